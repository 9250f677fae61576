use mimalloc::MiMalloc;
use pagefall::backend::HttpBackend;
use pagefall::config::Config;
use pagefall::resolver::PageResolver;
use pagefall::source::StaticSource;
use pagefall::types::{ConnectionConfig, Outcome};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let slug = std::env::args().nth(1).unwrap_or_else(|| cfg.home_slug.clone());
    let connection = connection_from_env();

    info!(
        slug = %slug,
        backend = %cfg.backend_url.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        configured = connection.is_some(),
        "resolving page"
    );

    let Some(backend_url) = cfg.backend_url.clone() else {
        warn!("no PAGEFALL_BACKEND_URL set; resolving from static data only");
        let backend = HttpBackend::new("http://localhost/".parse()?, cfg.fetch_timeout())?;
        let resolver = resolver(backend, &cfg);
        print_outcome(&resolver.resolve(&slug, None).await);
        return Ok(());
    };

    let backend = HttpBackend::new(backend_url, cfg.fetch_timeout())?;
    let resolver = resolver(backend, &cfg);
    print_outcome(&resolver.resolve(&slug, connection.as_ref()).await);
    Ok(())
}

fn resolver(backend: HttpBackend, cfg: &Config) -> PageResolver<HttpBackend> {
    let static_source = StaticSource::bundled(&cfg.home_slug, &cfg.default_template);
    PageResolver::new(backend, static_source, cfg)
}

/// Connection credentials come from the environment of this demo binary;
/// the library itself only ever receives them as explicit parameters.
fn connection_from_env() -> Option<ConnectionConfig> {
    let host = std::env::var("PAGEFALL_DB_HOST").ok()?;
    let username = std::env::var("PAGEFALL_DB_USERNAME").ok()?;
    Some(ConnectionConfig {
        host,
        username,
        password: std::env::var("PAGEFALL_DB_PASSWORD").unwrap_or_default(),
        database: std::env::var("PAGEFALL_DB_DATABASE").unwrap_or_default(),
    })
}

fn print_outcome(outcome: &Outcome) {
    match outcome.page() {
        Some(page) => {
            info!(source = ?page.source, "page resolved");
            println!("<style>{}</style>", page.stylesheet);
            println!("{}", page.html);
        }
        None => {
            warn!("page not found in any source");
            println!("404: page not found");
        }
    }
}
