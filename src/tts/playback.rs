//! Best-effort local playback
//!
//! Fire-and-forget: the player runs on a detached thread that nobody
//! joins, and every failure is only logged at debug level.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Candidate players for this platform, tried in order
fn player_commands(path: &Path) -> Vec<(String, Vec<String>)> {
    let file = path.display().to_string();
    if cfg!(target_os = "macos") {
        vec![("afplay".to_string(), vec![file])]
    } else if cfg!(target_os = "windows") {
        let script = format!(
            "(New-Object Media.SoundPlayer '{}').PlaySync()",
            file.replace('\'', "''")
        );
        vec![(
            "powershell".to_string(),
            vec!["-NoProfile".to_string(), "-Command".to_string(), script],
        )]
    } else {
        vec![
            ("aplay".to_string(), vec!["-q".to_string(), file.clone()]),
            ("paplay".to_string(), vec![file]),
        ]
    }
}

/// Play `path` on a detached thread
pub fn play_audio_detached(path: impl Into<PathBuf>) {
    let path = path.into();
    let spawned = std::thread::Builder::new()
        .name("tts-playback".to_string())
        .spawn(move || play(&path));
    if let Err(e) = spawned {
        tracing::debug!(error = %e, "Could not start playback thread");
    }
}

fn play(path: &Path) {
    for (program, args) in player_commands(path) {
        let status = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => return,
            Ok(status) => {
                tracing::debug!(player = %program, ?status, "Audio player exited with failure");
            }
            Err(e) => {
                tracing::debug!(player = %program, error = %e, "Audio player unavailable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_command_names_the_file() {
        let path = Path::new("tts_outputs/tts_abc.wav");
        let commands = player_commands(path);
        assert!(!commands.is_empty());
        for (_, args) in &commands {
            assert!(args.iter().any(|a| a.contains("tts_abc.wav")));
        }
    }

    #[test]
    fn test_missing_file_does_not_panic() {
        // Players fail (or are absent); nothing propagates.
        play(Path::new("/nonexistent/tts_missing.wav"));
        play_audio_detached("/nonexistent/tts_missing.wav");
    }
}
