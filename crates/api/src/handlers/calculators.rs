//! Public Zakat and Kaffarah calculators.
//!
//! Stateless: nothing is stored, the computation lives in `sadaqah_core`.

use axum::Json;
use sadaqah_core::kaffarah::{calculate_kaffarah, KaffarahInput, KaffarahResult};
use sadaqah_core::zakat::{calculate_zakat, ZakatInput, ZakatResult};

use crate::error::AppResult;
use crate::response::DataResponse;

/// POST /api/v1/calculators/zakat
///
/// 400 when the declared values are too large to compute exactly.
pub async fn zakat(
    Json(input): Json<ZakatInput>,
) -> AppResult<Json<DataResponse<ZakatResult>>> {
    let result = calculate_zakat(&input)?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/calculators/kaffarah
///
/// 400 when `days_missed` is not positive.
pub async fn kaffarah(
    Json(input): Json<KaffarahInput>,
) -> AppResult<Json<DataResponse<KaffarahResult>>> {
    let result = calculate_kaffarah(&input)?;
    Ok(Json(DataResponse { data: result }))
}
