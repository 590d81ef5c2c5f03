use super::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(EnhancedInputPlugin)
        .add_input_context::<PlayerCtx>()
        .add_observer(add_player_ctx)
        .add_observer(log_view_change)
        .add_observer(log_jump)
        .add_observer(log_attack);
}

/// Two-axis ground movement, `x` right and `y` forward.
#[derive(InputAction)]
#[action_output(Vec2)]
pub struct Move;

/// Right stick look at full deflection, in look units per second.
/// With the default sensitivity that is a half turn per second.
pub const STICK_LOOK_RATE: f32 = 1200.0;

/// Two-axis camera look, `x` turns right and `y` looks up.
/// Mouse motion already arrives as a per-frame delta, the stick is a rate
/// and gets multiplied by the frame time.
#[derive(InputAction)]
#[action_output(Vec2)]
pub struct Look;

/// Switches control mode, only honored while [`ViewModifier`] is held.
#[derive(InputAction)]
#[action_output(bool)]
pub struct ViewChange;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ViewModifier;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Jump;

#[derive(InputAction)]
#[action_output(bool)]
pub struct Attack;

/// Registers the player mapping context as soon as the context component lands on an entity.
pub fn add_player_ctx(add: On<Add, PlayerCtx>, mut commands: Commands) {
    let mut e = commands.entity(add.entity);

    e.insert(actions!(PlayerCtx[
        (
            Action::<Move>::new(),
            DeadZone::default(),
            Bindings::spawn(( Cardinal::wasd_keys(), Cardinal::arrows(), Axial::left_stick() )),
        ),
        (
            Action::<Look>::new(),
            Bindings::spawn((
                Spawn((Binding::mouse_motion(), Negate::y())),
                Axial::right_stick().with((Scale::splat(STICK_LOOK_RATE), DeltaScale)),
            )),
        ),
        (
            Action::<ViewModifier>::new(),
            bindings![KeyCode::ShiftLeft, GamepadButton::LeftTrigger],
        ),
        (
            Action::<ViewChange>::new(),
            bindings![KeyCode::KeyV, GamepadButton::North],
        ),
        (
            Action::<Jump>::new(),
            bindings![KeyCode::Space, GamepadButton::South],
        ),
        (
            Action::<Attack>::new(),
            bindings![MouseButton::Left, GamepadButton::RightTrigger2],
        ),
    ]));
}

fn log_view_change(_on: On<Start<ViewChange>>) {
    debug!("ViewChange");
}

fn log_jump(_on: On<Start<Jump>>) {
    debug!("Jump");
}

fn log_attack(_on: On<Start<Attack>>) {
    debug!("Attack");
}
