//! Stub collaborators shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Notify;

use crate::ports::{CloudError, CloudLifecycle, LaunchError, Launcher};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// Records every call; optionally fails all of them.
#[derive(Default)]
pub struct RecordingLauncher {
    processes: Mutex<Vec<String>>,
    urls: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingLauncher {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn processes(&self) -> Vec<String> {
        self.processes.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    fn result(&self, target: &str) -> Result<(), LaunchError> {
        match &self.fail_with {
            Some(message) => Err(LaunchError::Spawn {
                target: target.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch_process(&self, name: &str) -> Result<(), LaunchError> {
        self.processes.lock().unwrap().push(name.to_string());
        self.result(name)
    }

    async fn launch_url(&self, url: &str) -> Result<(), LaunchError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.result(url)
    }
}

pub struct PanickingLauncher;

#[async_trait]
impl Launcher for PanickingLauncher {
    async fn launch_process(&self, _name: &str) -> Result<(), LaunchError> {
        panic!("launcher blew up");
    }

    async fn launch_url(&self, _url: &str) -> Result<(), LaunchError> {
        panic!("launcher blew up");
    }
}

#[derive(Default)]
pub struct OkCloud {
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl OkCloud {
    pub fn start_calls(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudLifecycle for OkCloud {
    async fn start_instance(
        &self,
        _image_id: &str,
        _instance_type: &str,
        _region: &str,
    ) -> Result<String, CloudError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok("i-0123456789abcdef0".to_string())
    }

    async fn stop_instance(&self, _instance_id: &str, _region: &str) -> Result<(), CloudError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FailingCloud {
    error: CloudError,
}

impl FailingCloud {
    pub fn new(error: CloudError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl CloudLifecycle for FailingCloud {
    async fn start_instance(
        &self,
        _image_id: &str,
        _instance_type: &str,
        _region: &str,
    ) -> Result<String, CloudError> {
        Err(self.error.clone())
    }

    async fn stop_instance(&self, _instance_id: &str, _region: &str) -> Result<(), CloudError> {
        Err(self.error.clone())
    }
}

/// Signals `entered` when a call starts, then waits for `release`.
#[derive(Default)]
pub struct BlockingCloud {
    pub entered: Notify,
    pub release: Notify,
    stops: AtomicUsize,
}

impl BlockingCloud {
    pub fn stop_calls(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudLifecycle for BlockingCloud {
    async fn start_instance(
        &self,
        _image_id: &str,
        _instance_type: &str,
        _region: &str,
    ) -> Result<String, CloudError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("i-0123456789abcdef0".to_string())
    }

    async fn stop_instance(&self, _instance_id: &str, _region: &str) -> Result<(), CloudError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

/// Never returns.
pub struct HangingCloud;

#[async_trait]
impl CloudLifecycle for HangingCloud {
    async fn start_instance(
        &self,
        _image_id: &str,
        _instance_type: &str,
        _region: &str,
    ) -> Result<String, CloudError> {
        std::future::pending().await
    }

    async fn stop_instance(&self, _instance_id: &str, _region: &str) -> Result<(), CloudError> {
        std::future::pending().await
    }
}
