use std::process::ExitCode;

use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::{report, JsonFileRepository, RecordRepository, RecordStore};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

fn init_logging(cfg: &AppConfig) {
    match cfg.logging.format {
        LogFormat::Compact => common::utils::logging::init_logging_default(&cfg.logging.filter),
        LogFormat::Json => common::utils::logging::init_logging_json(&cfg.logging.filter),
    }
    info!(service = "pet-health", event = "logger_init", "tracing subscriber initialized");
}

/// Log what was loaded. The presentation layer takes the store from here.
fn summarize<R: RecordRepository>(store: &RecordStore<R>) {
    let users = store.users();
    let pets: usize = users.iter().map(|u| u.pets.len()).sum();
    let entries: usize = users
        .iter()
        .flat_map(|u| u.pets.iter())
        .map(|p| p.health_records.len() + p.vaccinations.len() + p.appointments.len())
        .sum();
    info!(users = users.len(), pets, entries, "records loaded");
    for user in users {
        for pet in &user.pets {
            debug!(owner = %user.username, pet = %report::pet_card(pet), "pet");
        }
    }
}

fn main() -> ExitCode {
    // 提前加载 .env，使得 RUST_LOG / CONFIG_PATH 等环境变量生效
    dotenv().ok();
    // 只有配置文件不存在时才回退到默认值；其它配置错误直接退出
    let cfg = match AppConfig::load_or_default() {
        Ok((cfg, found)) => {
            init_logging(&cfg);
            if !found {
                warn!(config_path = %configs::config_path(), "config file not found; using defaults");
            }
            cfg
        }
        Err(e) => {
            common::utils::logging::init_logging_default("info");
            error!(event = "config_invalid", error = %e, "invalid configuration; refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let session_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "pet-health",
            event = "panic",
            %session_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    info!(service = "pet-health", event = "start", %session_id, pid, version, data_file = %cfg.storage.data_file.display(), "starting");

    if let Err(e) = common::env::ensure_data_dir(&cfg.storage.data_file) {
        error!(event = "env_check_failed", error = %e, "data directory unavailable");
        return ExitCode::FAILURE;
    }

    let repo = JsonFileRepository::new(&cfg.storage.data_file, cfg.storage.pretty);
    let store = match RecordStore::open(repo) {
        Ok(store) => store,
        Err(e) => {
            error!(event = "load_failed", code = e.code(), error = %e, "cannot load records; refusing to start");
            return ExitCode::FAILURE;
        }
    };

    summarize(&store);
    info!(service = "pet-health", event = "stop", %session_id, "done");
    ExitCode::SUCCESS
}
