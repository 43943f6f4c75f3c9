#![forbid(unsafe_code)]

use super::{LookupError, LookupField, ProcessSample, ProcessSource, SourceError};
use crate::domain::Pid;
use sysinfo::{Process, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::trace;

/// Process source backed by `sysinfo`. Status is refreshed on every
/// snapshot; the executable path is read once per process. Threads are not
/// enumerated, only thread group leaders.
#[derive(Debug)]
pub struct SysinfoSource {
    system: System,
    refresh_kind: ProcessRefreshKind,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            refresh_kind: ProcessRefreshKind::nothing()
                .without_tasks()
                .with_exe(UpdateKind::OnlyIfNotSet),
        }
    }

    fn sample(pid: Pid, process: &Process) -> ProcessSample {
        let exe = process.exe().map(|path| path.to_path_buf()).ok_or_else(|| {
            LookupError::new(
                pid,
                LookupField::Executable,
                "not available (kernel thread or insufficient permissions)",
            )
        });

        ProcessSample {
            pid,
            exe,
            status: Ok(process.status().into()),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&mut self) -> Result<Vec<ProcessSample>, SourceError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SourceError::Unavailable(
                "platform is not supported by sysinfo".into(),
            ));
        }

        let refreshed =
            self.system
                .refresh_processes_specifics(ProcessesToUpdate::All, true, self.refresh_kind);
        trace!(refreshed, "refreshed process table");

        let processes = self.system.processes();
        if processes.is_empty() {
            return Err(SourceError::Unavailable("no processes visible".into()));
        }

        Ok(processes
            .iter()
            .map(|(pid, process)| Self::sample(Pid::new(pid.as_u32()), process))
            .collect())
    }
}
