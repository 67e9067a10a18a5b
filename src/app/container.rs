use std::sync::Arc;

use crate::adapters::{FfprobeAdapter, LocalFsAdapter, ProcessExecAdapter, ThinConfig};
use crate::app::thin_interactor::ThinInteractor;
use crate::domain::errors::DomainError;
use crate::domain::rules::SelectionPolicy;
use crate::planner::PlanOptions;
use crate::ports::{ExecutePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn thin_interactor(&self) -> Arc<ThinInteractor>;
}

pub struct DefaultAppContainer {
    thin_interactor: Arc<ThinInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &ThinConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let probe_port = Arc::new(FfprobeAdapter::new(config.ffprobe.clone()));
        let fs_port = Arc::new(LocalFsAdapter::new());
        let execute_port = Arc::new(ProcessExecAdapter::new(
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
        ));

        let policy = SelectionPolicy::new(config.languages.clone(), config.convert_lossless)?;
        let plan_options = PlanOptions {
            ffmpeg: config.ffmpeg.clone(),
            keep_original: config.keep_original,
        };

        let thin_interactor = Arc::new(ThinInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&execute_port) as Arc<dyn ExecutePort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            policy,
            plan_options,
            config.extensions.clone(),
            config.run,
        ));

        Ok(Self { thin_interactor })
    }
}

impl AppContainer for DefaultAppContainer {
    fn thin_interactor(&self) -> Arc<ThinInteractor> {
        Arc::clone(&self.thin_interactor)
    }
}
