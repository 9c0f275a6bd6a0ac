//! CSV 내보내기 핸들러

use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{get, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::exports::ExportService;
use crate::utils::csv_export::attachment_disposition;

fn csv_response(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((CONTENT_DISPOSITION, attachment_disposition(filename)))
        .body(body)
}

/// `GET /api/v1/exports/activities.csv`
#[get("/activities.csv")]
pub async fn export_activities(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let csv = ExportService::instance().activities_csv(&user.user_id).await?;
    Ok(csv_response("relief-activities.csv", csv))
}

/// `GET /api/v1/exports/bills.csv`
#[get("/bills.csv")]
pub async fn export_bills(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let csv = ExportService::instance().bills_csv(&user.user_id).await?;
    Ok(csv_response("relief-bills.csv", csv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_response_headers() {
        let response = csv_response("relief-bills.csv", "a,b\n1,2\n".to_string());

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"relief-bills.csv\""
        );
    }
}
