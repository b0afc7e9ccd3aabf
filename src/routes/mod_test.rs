use super::*;

#[tokio::test]
async fn health_reports_healthy_service() {
    let Json(body) = health().await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.service, SERVICE_NAME);
    assert!(OffsetDateTime::parse(&body.timestamp, &Rfc3339).is_ok());
}
