use crate::config::toml_config::{AppConfig, CatalogSourceKind};
use crate::domain::model::{FilterSpec, NewService, Price, SortMode};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-connect")]
#[command(about = "Browse, filter and favorite campus services")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, value_enum, help = "Catalog source override")]
    pub source: Option<CatalogSourceKind>,

    #[arg(long, global = true, help = "Static catalog file override")]
    pub catalog_path: Option<String>,

    #[arg(long, global = true, help = "Catalog API endpoint override")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Directory for favorites and theme")]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List services matching the given filters
    List(ListArgs),
    /// Show a single service
    Show { id: String },
    /// Toggle a service in the favorites
    Fav { id: String },
    /// List favorite service ids
    Favorites,
    /// Print category and university filter options
    Facets,
    /// Show or toggle the display theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Publish a new service (http source only)
    Add(AddArgs),
    /// Remove a service (http source only)
    Delete { id: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub university: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, help = "relevance, price-low-high, price-high-low, alpha or newest")]
    pub sort: Option<String>,

    #[arg(long, help = "Print card markup instead of text")]
    pub html: bool,
}

impl ListArgs {
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            category: self.category.clone(),
            university: self.university.clone(),
            search: self.search.clone(),
            sort: self.sort.as_deref().map(SortMode::parse_lenient),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub price: String,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub university: String,

    #[arg(long)]
    pub hostel: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub image: Option<String>,
}

impl AddArgs {
    pub fn to_new_service(&self) -> NewService {
        NewService {
            title: self.title.clone(),
            description: self.description.clone(),
            price: parse_price(&self.price),
            category: self.category.clone(),
            university: self.university.clone(),
            hostel: self.hostel.clone(),
            contact: self.contact.clone(),
            image: self.image.clone(),
            created_at: None,
        }
    }
}

fn parse_price(raw: &str) -> Price {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Price::from(n);
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Price::Number)
        .unwrap_or_else(|| Price::Text(raw.to_string()))
}

impl CliConfig {
    /// Config file (or defaults) with command line overrides applied.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(source) = self.source {
            config.catalog.source = source;
        }
        if let Some(path) = &self.catalog_path {
            config.catalog.path = path.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.catalog.endpoint = endpoint.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}
