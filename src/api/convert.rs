use axum::{body::Bytes, extract::Query, extract::State, response::Json};
use bead_convert::{DetailBoost, ResizeMode, Rgb};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ApiError, ProcessError};
use crate::models::{AppConfig, ConversionSettings, ProcessingRequest, ProcessingResult};
use crate::services::{decode_png, PipelineOrchestrator};

/// Query knobs for a conversion. Omitted knobs come from the configured defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConvertParams {
    pub w: Option<usize>,
    pub h: Option<usize>,
    pub colors: Option<usize>,
    /// 0 normal, 1 sharpen-eligible, 2 sharpen
    pub detail: Option<u8>,
    pub mode: Option<ResizeMode>,
    pub dither: Option<bool>,
    pub auto_template: Option<bool>,
    pub lock: Option<bool>,
    /// Comma-separated hex colors; implies `lock` unless it is set to false
    pub palette: Option<String>,
}

impl ConvertParams {
    /// Resolve the knobs against configuration.
    ///
    /// Only syntax is checked here; range checks happen on submission.
    pub fn into_settings(self, config: &AppConfig) -> Result<ConversionSettings, ApiError> {
        let defaults = ConversionSettings::from_defaults(&config.defaults);

        let detail_boost = match self.detail {
            Some(level) => DetailBoost::try_from(level)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => defaults.detail_boost,
        };

        let requested_palette = self.palette.as_deref().map(parse_palette).transpose()?;
        let use_palette_lock = self.lock.unwrap_or(requested_palette.is_some());
        let locked_palette = if use_palette_lock {
            requested_palette.or_else(|| config.palette.locked.clone())
        } else {
            None
        };

        Ok(ConversionSettings {
            target_width: self.w.unwrap_or(defaults.target_width),
            target_height: self.h.unwrap_or(defaults.target_height),
            max_colors: self.colors.unwrap_or(defaults.max_colors),
            detail_boost,
            resize_mode: self.mode.unwrap_or(defaults.resize_mode),
            use_palette_lock,
            locked_palette,
            enable_dithering: self.dither.unwrap_or(defaults.enable_dithering),
            auto_template_mode: self.auto_template.unwrap_or(defaults.auto_template_mode),
        })
    }
}

/// Split a comma-separated color list, keeping each entry as written.
pub fn parse_palette(list: &str) -> Result<Vec<String>, ApiError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Rgb::from_str(s)
                .map(|_| s.to_string())
                .map_err(|e| ApiError::BadRequest(format!("palette color '{s}': {e}")))
        })
        .collect()
}

/// Convert an uploaded PNG into a bead pattern.
pub async fn handle_convert(
    State(config): State<Arc<AppConfig>>,
    State(orchestrator): State<Arc<PipelineOrchestrator>>,
    Query(params): Query<ConvertParams>,
    body: Bytes,
) -> Result<Json<ProcessingResult>, ApiError> {
    tracing::info!(bytes = body.len(), ?params, "Conversion requested");

    let settings = params.into_settings(&config)?;
    let bitmap = tokio::task::spawn_blocking(move || decode_png(&body))
        .await
        .map_err(|e| ProcessError::Execution(format!("Decode task failed: {e}")))??;
    let request = ProcessingRequest::new(bitmap, settings);

    let result = orchestrator.submit_with_fallback(request, None).await?;
    Ok(Json(result))
}
