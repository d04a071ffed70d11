use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use locsearch_core::categories::Category;
use locsearch_core::{ResultTable, SearchOutcome};
use serde::{Deserialize, Serialize};

pub mod fetch;
pub mod transport;

pub use fetch::search_data;

/// Collections a search can be restricted to
#[derive(Debug, Clone, Copy, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryArg {
    #[value(name = "bills")]
    Bills,
    #[value(name = "house_bills")]
    HouseBills,
    #[value(name = "senate_bills")]
    SenateBills,
    #[value(name = "house_resolutions")]
    HouseResolutions,
    #[value(name = "senate_resolutions")]
    SenateResolutions,
    #[value(name = "federal_register")]
    FederalRegister,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Bills => Category::Bills,
            CategoryArg::HouseBills => Category::HouseBills,
            CategoryArg::SenateBills => Category::SenateBills,
            CategoryArg::HouseResolutions => Category::HouseResolutions,
            CategoryArg::SenateResolutions => Category::SenateResolutions,
            CategoryArg::FederalRegister => Category::FederalRegister,
        }
    }
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Search everything:
  locsearch search football

  # Only House bills:
  locsearch search tariff --partof house_bills

  # Machine-readable output:
  locsearch search \"civil war\" --json

NOTES:
  - Results are fetched 150 at a time, at most 750 records per search
  - Missing fields are shown as empty cells (null in JSON)")]
pub struct SearchOptions {
    /// Search phrase
    #[clap(env = "LOC_SEARCH_QUERY", default_value = "")]
    pub query: String,

    /// Only search within this collection
    #[arg(long, value_enum)]
    pub partof: Option<CategoryArg>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Truncate table cells to this many characters (0 disables truncation)
    #[arg(short, long, default_value = "60")]
    pub width: usize,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let category = options.partof.map(|c| Category::from(c).key());

    if global.verbose {
        eprintln!(
            "Searching {} for {:?} (partof: {})",
            global.base_url,
            options.query,
            category.unwrap_or("none")
        );
    }

    let outcome = search_data(&options.query, category, &global.base_url).await?;

    let table = match outcome {
        SearchOutcome::Table(table) => table,
        SearchOutcome::Failed(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    if global.verbose {
        eprintln!("Fetched {} records", table.len());
    }

    if options.json {
        println!("{}", format_table_json(&table)?);
    } else {
        print!("{}", format_table_text(&table, options.width));
    }

    Ok(())
}

fn format_table_json(table: &ResultTable) -> Result<String> {
    serde_json::to_string_pretty(table).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn truncate_cell(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(width).collect();
        f!("{truncated}...")
    }
}

fn format_table_text(table: &ResultTable, width: usize) -> String {
    if table.is_empty() {
        return f!("{}\n", "No records found.".yellow());
    }

    let mut pretty = new_table();
    pretty.set_titles(prettytable::Row::new(
        table
            .columns
            .iter()
            .map(|name| prettytable::Cell::new(name).style_spec("b"))
            .collect(),
    ));

    for row in &table.rows {
        pretty.add_row(prettytable::Row::new(
            row.iter()
                .map(|cell| {
                    prettytable::Cell::new(&truncate_cell(cell.as_deref().unwrap_or(""), width))
                })
                .collect(),
        ));
    }

    f!(
        "{}\n{}\n",
        pretty,
        f!("{} records", table.len()).green()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> ResultTable {
        ResultTable::from_records(&[
            json!({
                "id": "http://www.loc.gov/item/1/",
                "title": "Football rules",
                "language": ["english", "french"],
            }),
            json!({"id": "http://www.loc.gov/item/2/"}),
        ])
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("a longer value", 8), "a longer...");
        assert_eq!(truncate_cell("a longer value", 0), "a longer value");
        assert_eq!(truncate_cell("ééééé", 2), "éé...");
    }

    #[test]
    fn test_format_table_text() {
        let text = format_table_text(&sample_table(), 60);

        assert!(text.contains("Title"));
        assert!(text.contains("Original format"));
        assert!(text.contains("Football rules"));
        assert!(text.contains("english; french"));
        assert!(text.contains("2 records"));
    }

    #[test]
    fn test_format_table_text_empty() {
        let text = format_table_text(&ResultTable::empty(), 60);

        assert!(text.contains("No records found."));
    }

    #[test]
    fn test_format_table_json() {
        let json = format_table_json(&sample_table()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["columns"].as_array().unwrap().len(), 10);
        assert_eq!(parsed["rows"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["rows"][0][1], "Football rules");
        assert!(parsed["rows"][1][1].is_null());
    }

    #[test]
    fn test_category_arg_keys() {
        assert_eq!(Category::from(CategoryArg::HouseBills).key(), "house_bills");
        assert_eq!(
            Category::from(CategoryArg::FederalRegister).key(),
            "federal_register"
        );
    }
}
