use actix_web::{HttpResponse, web};

use crate::services::{CurrentUser, DashboardService};

use super::helpers::api_result;

/// GET /dashboard
pub async fn get_dashboard(
    user: web::ReqData<CurrentUser>,
    service: web::Data<DashboardService>,
) -> HttpResponse {
    api_result(service.summary(&user).await)
}
