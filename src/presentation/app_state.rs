// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::hotspot_service::HotspotService;
use crate::application::rotation_service::RotationService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub hotspot_service: HotspotService,
    pub rotation_service: RotationService,
}
