//! Manual control commands. Most are static acknowledgements with no
//! effect on the simulation; the recording pair drives the screen
//! recorder session.

use crate::recording::{RecordingStatus, ScreenRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualCommand {
    LockAll,
    FreezeAll,
    CancelOperation,
    UpdateFirmware,
    RestartDevices,
    StartRecording,
    StopRecording,
}

impl ManualCommand {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "lock-all" => Some(Self::LockAll),
            "freeze-all" => Some(Self::FreezeAll),
            "cancel-operation" => Some(Self::CancelOperation),
            "update-firmware" => Some(Self::UpdateFirmware),
            "restart-devices" => Some(Self::RestartDevices),
            "start-recording" => Some(Self::StartRecording),
            "stop-recording" => Some(Self::StopRecording),
            _ => None,
        }
    }

    pub fn execute(self, recorder: &ScreenRecorder) -> String {
        match self {
            Self::LockAll => "Manual Action: All devices locked for security.".into(),
            Self::FreezeAll => "Manual Action: Operations frozen for troubleshooting.".into(),
            Self::CancelOperation => "Manual Action: Current operation canceled.".into(),
            Self::UpdateFirmware => {
                "Manual Action: Firmware update initiated on selected devices.".into()
            }
            Self::RestartDevices => "Manual Action: All devices are restarting.".into(),
            Self::StartRecording => ack(recorder.start()),
            Self::StopRecording => ack(recorder.stop()),
        }
    }
}

fn ack(status: RecordingStatus) -> String {
    match status {
        RecordingStatus::Started | RecordingStatus::Stopped => {
            format!("Manual Action: {}", status.message())
        }
        RecordingStatus::AlreadyActive | RecordingStatus::NotActive => status.message().into(),
    }
}
