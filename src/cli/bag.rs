//! Bag command for Fairway.
//!
//! Lists the bag, shows the catalog, and adds or removes clubs.

use serde::{Deserialize, Serialize};

use crate::core::{abbreviation, canonical_name, AppState, CATEGORIES};
use crate::storage::KeyValueStore;

/// Options for the bag command.
#[derive(Debug, Clone, Default)]
pub struct BagOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Actions available in bag.
#[derive(Debug, Clone, PartialEq)]
pub enum BagAction {
    /// Show the clubs in the bag.
    List,
    /// Show every catalog club, marking those in the bag.
    Catalog,
    /// Add clubs to the bag.
    Add(Vec<String>),
    /// Remove clubs from the bag.
    Remove(Vec<String>),
}

impl BagAction {
    fn name(&self) -> &'static str {
        match self {
            BagAction::List => "list",
            BagAction::Catalog => "catalog",
            BagAction::Add(_) => "add",
            BagAction::Remove(_) => "remove",
        }
    }
}

/// Output format for the bag command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BagOutput {
    /// Whether the operation was successful.
    pub success: bool,
    /// The action performed.
    pub action: String,
    /// Bag contents after the action, in display order.
    pub clubs: Vec<ClubInfo>,
    /// Catalog listing (catalog action only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub catalog: Vec<CategoryInfo>,
    /// Clubs that were added.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub added: Vec<String>,
    /// Clubs that were removed.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub removed: Vec<String>,
    /// Names that needed no change (already present, or not in the bag).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unchanged: Vec<String>,
    /// Error message if the operation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A club with its short code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClubInfo {
    pub name: String,
    pub abbreviation: String,
}

impl ClubInfo {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation(name),
        }
    }
}

/// One catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub clubs: Vec<CatalogClub>,
}

/// A catalog club and whether it is in the bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogClub {
    pub name: String,
    pub in_bag: bool,
}

impl BagOutput {
    fn new(action: &BagAction) -> Self {
        Self {
            success: true,
            action: action.name().to_string(),
            clubs: Vec::new(),
            catalog: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
            unchanged: Vec::new(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(action: &BagAction, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::new(action)
        }
    }
}

/// The bag command implementation.
pub struct BagCommand<S: KeyValueStore> {
    state: AppState<S>,
}

impl<S: KeyValueStore> BagCommand<S> {
    /// Create a new bag command.
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::load(store),
        }
    }

    /// Run the bag command.
    pub fn run(&mut self, action: &BagAction) -> BagOutput {
        let mut output = BagOutput::new(action);

        match action {
            BagAction::List => {}
            BagAction::Catalog => {
                let bag = self.state.bag();
                output.catalog = CATEGORIES
                    .iter()
                    .map(|category| CategoryInfo {
                        name: category.name.to_string(),
                        clubs: category
                            .clubs
                            .iter()
                            .map(|club| CatalogClub {
                                name: club.to_string(),
                                in_bag: bag.contains(club),
                            })
                            .collect(),
                    })
                    .collect();
            }
            BagAction::Add(names) | BagAction::Remove(names) => {
                let adding = matches!(action, BagAction::Add(_));
                let mut bag = self.state.bag().clone();

                for name in names {
                    let mut club = canonical_name(name);
                    if club.is_empty() {
                        return BagOutput::failure(action, "club names cannot be empty");
                    }
                    let changed = if adding {
                        bag.insert(club.clone())
                    } else {
                        // Name or abbreviation, any case
                        if let Some(stored) = bag.resolve(&club).map(str::to_string) {
                            club = stored;
                        }
                        bag.remove(&club)
                    };
                    match (changed, adding) {
                        (true, true) => output.added.push(club),
                        (true, false) => output.removed.push(club),
                        (false, _) => output.unchanged.push(club),
                    }
                }

                if !output.added.is_empty() || !output.removed.is_empty() {
                    if let Err(e) = self.state.save_bag(bag) {
                        return BagOutput::failure(action, format!("Failed to save bag: {}", e));
                    }
                }
            }
        }

        output.clubs = self
            .state
            .bag()
            .sorted()
            .into_iter()
            .map(ClubInfo::new)
            .collect();
        output
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &BagOutput, options: &BagOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &BagOutput) -> String {
        if !output.success {
            return format!(
                "Bag {} failed: {}\n",
                output.action,
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = Vec::new();

        for club in &output.added {
            lines.push(format!("+ {}", club));
        }
        for club in &output.removed {
            lines.push(format!("- {}", club));
        }
        for club in &output.unchanged {
            lines.push(format!("  {} (no change)", club));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }

        if !output.catalog.is_empty() {
            for category in &output.catalog {
                lines.push(category.name.clone());
                for club in &category.clubs {
                    let mark = if club.in_bag { "x" } else { " " };
                    lines.push(format!("  [{}] {}", mark, club.name));
                }
            }
            return lines.join("\n");
        }

        if output.clubs.is_empty() {
            lines.push("Your bag is empty. Add clubs with 'fairway bag add <club>'.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Bag ({} clubs)", output.clubs.len()));
        for club in &output.clubs {
            lines.push(format!("  {:<3} {}", club.abbreviation, club.name));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{keys, MemoryKeyValueStore};
    use std::sync::Arc;

    fn names(clubs: &[ClubInfo]) -> Vec<&str> {
        clubs.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_list_empty_bag() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(&BagAction::List);

        assert!(output.success);
        assert!(output.clubs.is_empty());
        let text = cmd.format_output(&output, &BagOptions::default());
        assert!(text.contains("Your bag is empty"));
    }

    #[test]
    fn test_add_persists_in_display_order() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut cmd = BagCommand::new(Arc::clone(&store));

        let output = cmd.run(&BagAction::Add(vec![
            "sand wedge".to_string(),
            "Driver".to_string(),
            "7 Iron".to_string(),
        ]));

        assert!(output.success);
        assert_eq!(output.added, vec!["Sand Wedge", "Driver", "7 Iron"]);
        assert_eq!(names(&output.clubs), vec!["Driver", "7 Iron", "Sand Wedge"]);

        let stored: Vec<String> = store.get_json(keys::USER_BAG).unwrap().unwrap();
        assert_eq!(stored, vec!["Driver", "7 Iron", "Sand Wedge"]);
    }

    #[test]
    fn test_add_duplicate_is_unchanged() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        cmd.run(&BagAction::Add(vec!["Driver".to_string()]));

        let output = cmd.run(&BagAction::Add(vec!["driver".to_string()]));
        assert!(output.added.is_empty());
        assert_eq!(output.unchanged, vec!["Driver"]);
        assert_eq!(output.clubs.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        cmd.run(&BagAction::Add(vec!["Driver".to_string(), "Putter".to_string()]));

        let output = cmd.run(&BagAction::Remove(vec![
            "putter".to_string(),
            "3 Wood".to_string(),
        ]));
        assert_eq!(output.removed, vec!["Putter"]);
        assert_eq!(output.unchanged, vec!["3 Wood"]);
        assert_eq!(names(&output.clubs), vec!["Driver"]);
    }

    #[test]
    fn test_remove_custom_club_ignores_case() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut cmd = BagCommand::new(Arc::clone(&store));
        cmd.run(&BagAction::Add(vec!["Chipper".to_string(), "7 Iron".to_string()]));

        let output = cmd.run(&BagAction::Remove(vec!["chipper".to_string(), "7i".to_string()]));
        assert!(output.success);
        assert_eq!(output.removed, vec!["Chipper", "7 Iron"]);
        assert!(output.clubs.is_empty());

        let stored: Vec<String> = store.get_json(keys::USER_BAG).unwrap().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_custom_club_kept_verbatim() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(&BagAction::Add(vec!["Chipper".to_string(), "Driver".to_string()]));

        assert_eq!(names(&output.clubs), vec!["Driver", "Chipper"]);
        assert_eq!(output.clubs[1].abbreviation, "CH");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(&BagAction::Add(vec!["  ".to_string()]));
        assert!(!output.success);
        assert!(output.error.is_some());
    }

    #[test]
    fn test_catalog_marks_bag() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        cmd.run(&BagAction::Add(vec!["7 Iron".to_string()]));

        let output = cmd.run(&BagAction::Catalog);
        let irons = output
            .catalog
            .iter()
            .find(|c| c.name == "Irons")
            .unwrap();
        assert!(irons.clubs.iter().any(|c| c.name == "7 Iron" && c.in_bag));
        assert!(irons.clubs.iter().any(|c| c.name == "8 Iron" && !c.in_bag));

        let text = cmd.format_output(&output, &BagOptions::default());
        assert!(text.contains("[x] 7 Iron"));
        assert!(text.contains("[ ] 8 Iron"));
    }

    #[test]
    fn test_format_json_and_quiet() {
        let mut cmd = BagCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(&BagAction::Add(vec!["Driver".to_string()]));

        let json = cmd.format_output(
            &output,
            &BagOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["action"], "add");
        assert_eq!(parsed["clubs"][0]["abbreviation"], "Dr");

        let quiet = cmd.format_output(
            &output,
            &BagOptions {
                json: false,
                quiet: true,
            },
        );
        assert!(quiet.is_empty());
    }
}
