use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Banner, BannerTone};

/// Shown above sample rows so nobody mistakes them for live data.
#[component]
pub fn FallbackNotice(error: AppError) -> Element {
    rsx! {
        Banner {
            tone: BannerTone::Info,
            title: "Showing sample data".to_string(),
            message: format!("Live data could not be loaded: {}", error.message),
        }
    }
}
