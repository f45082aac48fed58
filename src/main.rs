use campus_connect::config::cli::Command;
use campus_connect::core::facets::{category_options, university_options};
use campus_connect::domain::reference::{CATEGORIES, UNIVERSITIES};
use campus_connect::present::text::write_card;
use campus_connect::utils::error::{CatalogError, ErrorSeverity};
use campus_connect::utils::{logger, validation::Validate};
use campus_connect::{
    build_catalog, open_storage, AppConfig, CatalogStore, CliConfig, FavoritesStore, FilterSpec,
    HtmlPresenter, HttpCatalog, ServiceId, TextPresenter, ThemeStore, ViewController,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_app_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(cli.command, &config).await {
        exit_with(e);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> campus_connect::Result<()> {
    let storage = open_storage(config);

    match command {
        Command::List(args) => {
            let controller =
                ViewController::new(build_catalog(config)?, FavoritesStore::open(storage));
            let spec = args.filter_spec();
            if args.html {
                let mut presenter = HtmlPresenter::new();
                controller.render(&spec, &mut presenter).await;
                print!("{}", presenter.markup());
            } else {
                let mut presenter = TextPresenter::new(std::io::stdout());
                controller.render(&spec, &mut presenter).await;
            }
        }
        Command::Show { id } => {
            let controller =
                ViewController::new(build_catalog(config)?, FavoritesStore::open(storage));
            let id = ServiceId::new(id);
            match controller.show(&id).await? {
                Some(card) => write_card(&mut std::io::stdout(), &card)?,
                None => return Err(CatalogError::NotFoundError { id: id.to_string() }),
            }
        }
        Command::Fav { id } => {
            let mut favorites = FavoritesStore::open(storage);
            let id = ServiceId::new(id);
            if favorites.toggle_favorite(&id)? {
                println!("★ {} added to favorites", id);
            } else {
                println!("☆ {} removed from favorites", id);
            }
        }
        Command::Favorites => {
            let favorites = FavoritesStore::open(storage);
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for id in favorites.ids() {
                println!("{}", id);
            }
        }
        Command::Facets => {
            // 目錄讀取失敗時仍列出已知分類
            let records = match build_catalog(config)?.fetch(&FilterSpec::default()).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Error populating categories: {}", e);
                    Vec::new()
                }
            };
            println!("Categories:");
            for category in category_options(&records, CATEGORIES) {
                println!("  {}", category);
            }
            println!("Universities:");
            for university in university_options(UNIVERSITIES) {
                println!("  {}", university);
            }
        }
        Command::Theme { toggle } => {
            let themes = ThemeStore::new(storage);
            let theme = if toggle { themes.toggle()? } else { themes.current() };
            println!("{}", theme);
        }
        Command::Add(args) => {
            let catalog = http_catalog(config)?;
            let created = catalog.create(&args.to_new_service()).await?;
            println!("✅ Created service {} ({})", created.id, created.title);
        }
        Command::Delete { id } => {
            let catalog = http_catalog(config)?;
            let confirmation = catalog.delete(&ServiceId::new(id)).await?;
            println!("✅ {}", confirmation.message);
        }
    }

    Ok(())
}

fn http_catalog(config: &AppConfig) -> campus_connect::Result<HttpCatalog> {
    if config.catalog.source != campus_connect::config::CatalogSourceKind::Http {
        return Err(CatalogError::ConfigError {
            message: "add/delete need the http catalog source (use --source http)".to_string(),
        });
    }
    HttpCatalog::new(&config.catalog.endpoint, config.timeout())
}

fn exit_with(e: CatalogError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
