//! `calcany query`

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::core::{DisplayItem, QueryEngine};

pub fn run_query(text: &str, json: bool, parallel: bool, copy: Option<usize>) -> Result<()> {
    let config = Config::load();
    let engine = QueryEngine::from_config(&config).with_parallel(parallel);
    let items = engine.query(text);

    if json {
        let out = serde_json::to_string_pretty(&items).context("Failed to serialize items")?;
        println!("{}", out);
    } else if items.is_empty() {
        eprintln!("No results");
    } else {
        for line in render(&items) {
            println!("{}", line);
        }
    }

    if let Some(index) = copy {
        let Some(item) = items.get(index) else {
            bail!("No item at position {} ({} items)", index, items.len());
        };
        let Some(action) = item.actions.iter().find(|a| a.id == "clipboard") else {
            bail!("Item {} has nothing to copy", index);
        };
        action.invoke();
        #[cfg(not(feature = "clipboard"))]
        eprintln!("Built without the `clipboard` feature; nothing was copied");
    }

    Ok(())
}

/// One line per item: position, text and subtext
fn render(items: &[DisplayItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if item.subtext.is_empty() {
                format!("{:>2}. {}", i, item.text)
            } else {
                format!("{:>2}. {}  ({})", i, item.text, item.subtext)
            }
        })
        .collect()
}
