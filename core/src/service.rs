//! Follow-up checks on sweep hits.

use netsweep_common::{debug, success};

use crate::http::{Method, RequestExecutor};
use crate::scanner::ScanHit;

/// A hit together with what the follow-up request returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub hit: ScanHit,
    /// Response body, or `None` when the request failed.
    pub body: Option<String>,
}

impl ServiceReport {
    pub fn responded(&self) -> bool {
        self.body.is_some()
    }
}

/// Issues an empty GET to the root of `hit`. Any response, even an empty one,
/// means an HTTP service is listening.
pub async fn check_service<E>(executor: &E, hit: &ScanHit) -> ServiceReport
where
    E: RequestExecutor + ?Sized,
{
    let url = hit.url();
    let body = match executor.execute(&url, "", Method::Get).await {
        Ok(body) => {
            success!("HTTP service answered on {}:{}", hit.host, hit.port);
            Some(body)
        }
        Err(err) => {
            debug!("No HTTP service on {}:{}: {err}", hit.host, hit.port);
            None
        }
    };
    ServiceReport {
        hit: hit.clone(),
        body,
    }
}

/// Runs [`check_service`] on each hit in order.
pub async fn check_services<E>(executor: &E, hits: &[ScanHit]) -> Vec<ServiceReport>
where
    E: RequestExecutor + ?Sized,
{
    let mut reports = Vec::with_capacity(hits.len());
    for hit in hits {
        reports.push(check_service(executor, hit).await);
    }
    reports
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
