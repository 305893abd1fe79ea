use std::sync::Arc;

use crate::commands::{build_runtime, load_config, open_catalog_read_only, CommandResult};
use stylist_agent::{AssistantReply, ShopAssistant};
use stylist_core::domain::product::ProductSummary;
use stylist_db::repositories::SqlProductRepository;

pub fn run(query: &str, json_output: bool) -> CommandResult {
    let config = match load_config("ask") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("ask") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = open_catalog_read_only(&config)?;
        let assistant =
            ShopAssistant::from_config(&config, Arc::new(SqlProductRepository::new(pool.clone())))
                .map_err(|error| ("generation_client", error.to_string(), 6u8))?;

        let reply = assistant.handle_query(query).await;
        pool.close().await;
        Ok::<AssistantReply, (&'static str, String, u8)>(reply)
    });

    match result {
        Ok(reply) if json_output => match serde_json::to_string_pretty(&reply) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure("ask", "serialization", error.to_string(), 7),
        },
        Ok(reply) => CommandResult { exit_code: 0, output: render_human(&reply) },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("ask", error_class, message, exit_code)
        }
    }
}

const ADVICE_INTRO: &str = "I couldn't find exact matches in our database, but here's a suggestion:";

pub fn render_human(reply: &AssistantReply) -> String {
    match reply {
        AssistantReply::OutOfDomain { message } => message.clone(),
        AssistantReply::Advice { message } => {
            format!("{ADVICE_INTRO}\n{message}")
        }
        AssistantReply::Products { products } => {
            let mut lines =
                vec![format!("Found {} products matching your query:", products.len())];
            lines.extend(products.iter().map(render_product));
            lines.join("\n")
        }
    }
}

fn render_product(product: &ProductSummary) -> String {
    let mut block = format!(
        "- {} ({}, {})\n  {}",
        product.name, product.brand, product.colour, product.description
    );
    if let Some(price) = &product.price {
        block.push_str(&format!("\n  Price: {price}"));
    }
    if let Some(rating) = &product.rating {
        block.push_str(&format!("\n  Rating: {rating}"));
    }
    block
}
