use serde::Serialize;
use stylist_core::config::{AppConfig, LoadOptions};
use stylist_db::connect_read_only;
use stylist_db::repositories::{ProductRepository, SqlProductRepository};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_generation(&config));
            checks.extend(check_database(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["generation_endpoint", "database_connectivity", "catalog_readiness"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

// Reports configuration only; the endpoint is never called from here.
fn check_generation(config: &AppConfig) -> DoctorCheck {
    let details = if config.generation.enabled {
        let auth = if config.generation.api_key.is_some() { "with api key" } else { "anonymous" };
        format!(
            "hosted generation at `{}` ({auth}, timeout {}s)",
            config.generation.endpoint, config.generation.timeout_secs
        )
    } else {
        "generation disabled; advice comes from the canned fallback table".to_string()
    };

    DoctorCheck { name: "generation_endpoint", status: CheckStatus::Pass, details }
}

fn check_database(config: &AppConfig) -> Vec<DoctorCheck> {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return vec![DoctorCheck {
                name: "database_connectivity",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            }];
        }
    };

    runtime.block_on(async {
        let connectivity_failure = |details: String| {
            vec![
                DoctorCheck { name: "database_connectivity", status: CheckStatus::Fail, details },
                DoctorCheck {
                    name: "catalog_readiness",
                    status: CheckStatus::Skipped,
                    details: "skipped because the database is unreachable".to_string(),
                },
            ]
        };

        let pool = match connect_read_only(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        ) {
            Ok(pool) => pool,
            Err(error) => return connectivity_failure(format!("invalid database url: {error}")),
        };
        if let Err(error) = sqlx::query("SELECT 1").execute(&pool).await {
            pool.close().await;
            return connectivity_failure(format!("failed to open database: {error}"));
        }

        let connectivity = DoctorCheck {
            name: "database_connectivity",
            status: CheckStatus::Pass,
            details: format!("opened `{}` read-only", config.database.url),
        };
        let catalog = match SqlProductRepository::new(pool.clone()).count().await {
            Ok(0) => DoctorCheck {
                name: "catalog_readiness",
                status: CheckStatus::Pass,
                details: "fashion_items is empty; every query will get advice".to_string(),
            },
            Ok(count) => DoctorCheck {
                name: "catalog_readiness",
                status: CheckStatus::Pass,
                details: format!("fashion_items holds {count} products"),
            },
            Err(error) => DoctorCheck {
                name: "catalog_readiness",
                status: CheckStatus::Fail,
                details: format!("fashion_items is not readable (run `stylist migrate`): {error}"),
            },
        };

        pool.close().await;
        vec![connectivity, catalog]
    })
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
