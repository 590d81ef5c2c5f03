use super::*;

pub fn plugin(app: &mut App) {
    app.add_observer(log_control_mode)
        .add_observer(log_montage_ended);
}

/// Triggered on the character after its control mode flipped.
#[derive(EntityEvent, Debug, Clone)]
pub struct ControlModeChanged {
    pub entity: Entity,
    pub mode: ControlMode,
}

/// Triggered on the character when the attack montage stops playing.
/// Finished and interrupted playback both end the attack.
#[derive(EntityEvent, Debug, Clone)]
pub struct MontageEnded {
    pub entity: Entity,
    pub montage: AnimationNodeIndex,
    pub interrupted: bool,
}

fn log_control_mode(on: On<ControlModeChanged>) {
    info!("{}: control mode -> {}", on.entity, on.mode.as_str());
}

fn log_montage_ended(on: On<MontageEnded>) {
    debug!(
        "{}: montage {:?} ended (interrupted: {})",
        on.entity, on.montage, on.interrupted
    );
}
