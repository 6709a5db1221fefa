use std::sync::Arc;

use dynasty_persistence_sea_orm::{
    accounts::AccountRepositoryImpl, coaches::CoachRepositoryImpl,
    dynasties::DynastyRepositoryImpl,
};
use dynasty_server_app::{build_application, domain::account::BcryptPasswordHasher};
use log::{LevelFilter, info};
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

fn init_logger() {
    let file_path = std::env::var("LOG_FILE_PATH").expect("LOG_FILE_PATH must be set");
    let archive_pattern =
        std::env::var("LOG_ARCHIVE_PATTERN").expect("LOG_ARCHIVE_PATTERN must be set");

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();

    let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
    let roller = FixedWindowRoller::builder()
        .build(&archive_pattern, LOG_FILE_COUNT)
        .expect("Invalid LOG_ARCHIVE_PATTERN");
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
        .build(file_path, Box::new(policy))
        .expect("Failed to open log file");

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("logfile", Box::new(logfile)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
                .build("stderr", Box::new(stderr)),
        )
        .build(
            Root::builder()
                .appender("logfile")
                .appender("stderr")
                .build(LevelFilter::Trace),
        )
        .expect("Invalid logger configuration");

    log4rs::init_config(config).expect("Failed to initialize logger");
}

fn password_hasher() -> BcryptPasswordHasher {
    match std::env::var("DYNASTY_BCRYPT_COST") {
        Ok(cost) => BcryptPasswordHasher::new(
            cost.parse()
                .expect("DYNASTY_BCRYPT_COST must be a valid u32"),
        ),
        Err(_) => BcryptPasswordHasher::default(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        eprintln!("No .env file found, using the process environment");
    }

    init_logger();

    let account_repo = Arc::new(AccountRepositoryImpl::new().await);
    let dynasty_repo = Arc::new(DynastyRepositoryImpl::new().await);
    let coach_repo = Arc::new(CoachRepositoryImpl::new().await);

    let app = Arc::new(build_application(
        account_repo,
        dynasty_repo,
        coach_repo,
        Arc::new(password_hasher()),
    ));

    info!("Starting application");

    let http_app = tokio::spawn(async move {
        dynasty_server_api::run(app, shutdown_signal()).await;
    });

    if let Err(e) = http_app.await {
        log::error!("HTTP API task failed: {}", e);
    }
}
