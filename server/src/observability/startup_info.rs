use thumbgen_application::infrastructure_config::{
    Config, EventsConfig, StorageBackend, StorageConfig, ThumbnailConfig,
};
use tracing::info;

pub fn print_startup_info(config: &Config) {
    print_endpoint_info(config);
    print_storage_info(&config.storage);
    print_thumbnail_info(&config.thumbnail);
    print_event_info(&config.events);
}

fn print_endpoint_info(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 Endpoints:");
    info!("  📨 Storage events: POST {}/events/{{s3,openwhisk,azure}}", base_url);
    info!("  📤 Upload: POST {}/upload", base_url);
    info!("  💓 Health: GET {}/health", base_url);
}

fn print_storage_info(storage: &StorageConfig) {
    info!("⚙️  Configuration:");
    info!(
        "  🗄️  Storage: {} (source bucket '{}', thumbnail bucket '{}')",
        storage.backend, storage.source_bucket, storage.thumbnail_bucket
    );

    match storage.backend {
        StorageBackend::S3 => info!(
            "  ☁️  S3 region {}, endpoint {}, static credentials: {}",
            storage.s3.region,
            storage
                .s3
                .redacted_endpoint()
                .unwrap_or_else(|| "default".to_string()),
            if storage.s3.static_credentials().is_some() {
                "yes"
            } else {
                "no"
            }
        ),
        StorageBackend::Local => info!("  📁 Local root: {}", storage.local.root),
        StorageBackend::Memory => info!("  🧠 In-memory store; objects are lost on restart"),
    }
}

fn print_thumbnail_info(thumbnail: &ThumbnailConfig) {
    info!(
        "  📐 Bounding box: {}x{} ({:?}, upscale {})",
        thumbnail.max_width,
        thumbnail.max_height,
        thumbnail.scale_policy,
        if thumbnail.allow_upscale { "on" } else { "off" }
    );
    info!(
        "  🖼️  Output: {:?}, JPEG quality {}, naming {:?}",
        thumbnail.output_format, thumbnail.jpeg_quality, thumbnail.destination
    );
}

fn print_event_info(events: &EventsConfig) {
    info!(
        "  🔎 Accepted event statuses: {}",
        events.accepted_statuses.join(", ")
    );
    if !events.ignored_key_prefixes.is_empty() {
        info!(
            "  🙈 Ignored key prefixes: {}",
            events.ignored_key_prefixes.join(", ")
        );
    }
}
