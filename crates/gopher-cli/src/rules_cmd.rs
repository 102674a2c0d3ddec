//! `gopher rules`: print the rule table in evaluation order.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use gopher_core::config::load_config;
use gopher_dispatch::rules::{RuleTable, Scope, Shadowing};

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let rules = RuleTable::standard(&config.playground);

    println!();
    println!("{}", "Gopher rules (first match wins)".cyan().bold());
    println!();
    for (index, rule) in rules.iter().enumerate() {
        let scope = match rule.scope {
            Scope::Ambient => "ambient".dimmed(),
            Scope::Addressed => "addressed".normal(),
        };
        println!("  {:>3}  {:<10} {:<22} {}", index, scope, rule.name, rule.matcher);
    }
    println!();

    let shadowed = rules.shadowed();
    if shadowed.is_empty() {
        println!("  {} no shadowed rules", "✓".green());
    } else {
        for line in describe_shadowed(&rules, &shadowed) {
            println!("  {} {}", "⚠".yellow(), line);
        }
    }
    println!();

    Ok(())
}

/// Log one warning per rule that can never fire.
pub fn warn_shadowed(rules: &RuleTable) {
    let shadowed = rules.shadowed();
    for line in describe_shadowed(rules, &shadowed) {
        warn!("{line}");
    }
}

fn describe_shadowed(rules: &RuleTable, shadowed: &[Shadowing]) -> Vec<String> {
    shadowed
        .iter()
        .filter_map(|s| {
            let earlier = rules.get(s.earlier)?;
            let later = rules.get(s.later)?;
            Some(format!(
                "rule #{} {} ({}) is shadowed by rule #{} {} ({})",
                s.later, later.name, later.matcher, s.earlier, earlier.name, earlier.matcher
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_dispatch::commands::Command;
    use gopher_dispatch::rules::{Matcher, Rule};

    #[test]
    fn describe_shadowed_pair() {
        let rules = RuleTable::new(vec![
            Rule::addressed("thanks", Matcher::Contains("thank"), Command::FlipCoin),
            Rule::addressed("thank-you", Matcher::Equals("thank you"), Command::Version),
        ]);
        let lines = describe_shadowed(&rules, &rules.shadowed());
        assert_eq!(
            lines,
            vec![
                "rule #1 thank-you (equals \"thank you\") is shadowed by rule #0 thanks (contains \"thank\")"
                    .to_string()
            ]
        );
    }

    #[test]
    fn describe_standard_table_is_clean() {
        let rules = RuleTable::standard(&Default::default());
        assert!(describe_shadowed(&rules, &rules.shadowed()).is_empty());
    }
}
