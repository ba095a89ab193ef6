//! User prompts built from conversation slots

use crate::slots::SlotBag;
use serde_json::Value;

const PREAMBLE: &str = "Tu es un assistant de cuisine. Tu dois répondre UNIQUEMENT en JSON valide, \
sans texte autour. La réponse doit respecter exactement le schéma demandé.";

const UNSPECIFIED: &str = "non précisé";

/// Prompt for "what can I cook with these ingredients"
pub fn ingredients_prompt(slots: &SlotBag) -> String {
    format!(
        "{PREAMBLE}\n\n\
         Contexte utilisateur: il donne des ingrédients disponibles, \
         et veut une recette faisable.\n\n\
         Ingrédients disponibles: {}\n\
         Contraintes (optionnel): {}\n\
         Temps max (optionnel): {}\n\
         Nombre de personnes (optionnel): {}\n",
        render(slots, "liste_ingredients"),
        render(slots, "contraintes"),
        render(slots, "temps_max"),
        render(slots, "nb_personnes"),
    )
}

/// Prompt for a full card of a named recipe.
///
/// Returns `None` when `nom_recette` is unset or blank; the caller asks
/// for it instead of calling the backend. Any other value is rendered like
/// the optional slots.
pub fn name_prompt(slots: &SlotBag) -> Option<String> {
    let name = render_value(slots.get("nom_recette"))?;

    Some(format!(
        "{PREAMBLE}\n\n\
         Contexte utilisateur: il donne le NOM d'une recette, et veut une fiche complète.\n\n\
         Nom de la recette: {}\n\
         Nombre de personnes (optionnel): {}\n\
         Temps max (optionnel): {}\n\
         Contraintes (optionnel): {}\n\
         Difficulté souhaitée (optionnel): {}\n",
        name,
        render(slots, "nb_personnes"),
        render(slots, "temps_max"),
        render(slots, "contraintes"),
        render(slots, "difficulte"),
    ))
}

fn render(slots: &SlotBag, name: &str) -> String {
    render_value(slots.get(name)).unwrap_or_else(|| UNSPECIFIED.to_string())
}

/// Human-readable slot value: lists are comma-joined, scalars printed bare.
/// `None` for an unset slot, a blank string or an empty list.
fn render_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}
