use axum::{
    extract::{Path, State},
    Json,
};

use super::{ApiError, AppState};
use crate::market_data::normaliser::{get_stock_price, PriceRecord};

pub async fn read_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceRecord>, ApiError> {
    let record = get_stock_price(state.source.as_ref(), &symbol).await?;
    Ok(Json(record))
}
