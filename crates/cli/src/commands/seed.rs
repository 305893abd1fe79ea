use crate::commands::{build_runtime, load_config, open_catalog, CommandFailure, CommandResult};
use stylist_db::DemoCatalog;

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = open_catalog(&config).await?;

        let seed_result = DemoCatalog::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = DemoCatalog::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result: Result<usize, CommandFailure> = if verification.all_present {
            Ok(seed_result.products_seeded)
        } else {
            Err(("seed_verification", verification_message(&verification.missing), 6u8))
        };

        pool.close().await;
        run_result
    });

    match result {
        Ok(products_seeded) => CommandResult::success(
            "seed",
            format!("demo catalog loaded: {products_seeded} products in fashion_items"),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn verification_message(missing: &[&str]) -> String {
    if missing.is_empty() {
        "Some demo products failed to load".to_string()
    } else {
        format!("Seed verification failed for products: {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::verification_message;

    #[test]
    fn verification_error_message_names_missing_products() {
        assert_eq!(
            verification_message(&["Wool Overcoat", "Leather Belt"]),
            "Seed verification failed for products: Wool Overcoat, Leather Belt"
        );
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_names() {
        assert_eq!(verification_message(&[]), "Some demo products failed to load");
    }
}
