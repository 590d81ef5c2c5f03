use super::*;
use bevy_tnua::{TnuaAnimatingStateDirective, builtins::*};

/// Recursively find the first entity with AnimationPlayer in a subtree.
pub fn find_animation_player_descendant(
    entity: Entity,
    children_q: &Query<&Children>,
    anim_players: &Query<Entity, With<AnimationPlayer>>,
) -> Option<Entity> {
    if anim_players.get(entity).is_ok() {
        return Some(entity);
    }
    if let Ok(children) = children_q.get(entity) {
        for child in children.iter() {
            if let Some(found) = find_animation_player_descendant(child, children_q, anim_players) {
                return Some(found);
            }
        }
    }
    None
}

/// Build the character's animation graph once its model scene is in the world.
pub fn prepare_animations(
    on: On<SceneInstanceReady>,
    cfg: Res<Config>,
    models: Option<Res<Models>>,
    gltf_assets: Res<Assets<Gltf>>,
    children_q: Query<&Children>,
    anim_players: Query<Entity, With<AnimationPlayer>>,
    parents: Query<&ChildOf>,
    mut player: Query<&mut Player>,
    mut commands: Commands,
    mut animation_graphs: ResMut<Assets<AnimationGraph>>,
) {
    let Some(gltf) = models.and_then(|models| gltf_assets.get(&models.player)) else {
        return;
    };

    // Find AnimationPlayer as descendant of the scene entity that just loaded
    let scene_entity = on.entity;
    let Some(animation_player) =
        find_animation_player_descendant(scene_entity, &children_q, &anim_players)
    else {
        warn!("player model has no animation player, animations disabled");
        return;
    };

    // Walk up to find the Player entity (scene entity -> player entity)
    let player_entity = parents
        .get(scene_entity)
        .map(ChildOf::parent)
        .unwrap_or(scene_entity);
    let Ok(mut player) = player.get_mut(player_entity) else {
        return;
    };

    let mut graph = AnimationGraph::new();
    let root_node = graph.root;
    let used = cfg.animation.used_clips();

    for (name, clip_handle) in gltf.named_animations.iter() {
        if !used.contains(&name.as_ref()) {
            continue;
        }
        let node_index = graph.add_clip(clip_handle.clone(), 1.0, root_node);
        debug!("loaded animation: {name}");
        player.animations.insert(name.to_string(), node_index);
    }

    for clip in used {
        if !player.animations.contains_key(clip) {
            warn!("player model is missing animation {clip}");
        }
    }

    player.anim_player_entity = Some(animation_player);

    commands.entity(animation_player).insert((
        AnimationGraphHandle(animation_graphs.add(graph)),
        AnimationTransitions::new(),
    ));
}

/// Pick the locomotion clip from what the tnua controller is doing.
/// <https://github.com/idanarye/bevy-tnua/blob/main/demos/src/character_animating_systems/platformer_animating_systems.rs>
pub fn animating(
    cfg: Res<Config>,
    mut player_q: Query<(
        &TnuaController,
        &mut Player,
        &mut TnuaAnimatingState<AnimationState>,
        &AttackState,
    )>,
    mut animation_query: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let blend = Duration::from_millis(cfg.animation.blend_ms);
    let clips = &cfg.animation;

    for (controller, mut player, mut animating_state, attack) in player_q.iter_mut() {
        let Some(anim_entity) = player.anim_player_entity else {
            continue;
        };
        let Ok((mut animation_player, mut transitions)) = animation_query.get_mut(anim_entity)
        else {
            continue;
        };

        // The attack montage owns the animation player until it ends.
        if attack.is_attacking {
            player.animation_state = AnimationState::Attack;
            // keep in sync so the first locomotion state after the attack is an Alter
            animating_state.update_by_discriminant(AnimationState::Attack);
            continue;
        }

        let current_animation = match controller.action_name() {
            Some(TnuaBuiltinJump::NAME) => {
                let Some((_, jump_state)) = controller.concrete_action::<TnuaBuiltinJump>() else {
                    continue;
                };
                match jump_state {
                    TnuaBuiltinJumpState::NoJump => continue,
                    TnuaBuiltinJumpState::StartingJump { .. } => AnimationState::JumpStart,
                    TnuaBuiltinJumpState::SlowDownTooFastSlopeJump { .. } => {
                        AnimationState::JumpStart
                    }
                    TnuaBuiltinJumpState::MaintainingJump { .. } => AnimationState::JumpLoop,
                    TnuaBuiltinJumpState::StoppedMaintainingJump => AnimationState::JumpLand,
                    TnuaBuiltinJumpState::FallSection => AnimationState::Fall,
                }
            }
            Some(other) => {
                warn!("no animation for tnua action {other}");
                continue;
            }
            None => {
                let Some((_, basis_state)) = controller.concrete_basis::<TnuaBuiltinWalk>() else {
                    continue;
                };
                if basis_state.standing_on_entity().is_none() {
                    AnimationState::Fall
                } else {
                    let basis_speed = basis_state.running_velocity.length();
                    if basis_speed > cfg.player.movement.idle_to_run_threshold {
                        AnimationState::Run(clips.run_playback_scale * basis_speed)
                    } else {
                        AnimationState::Idle
                    }
                }
            }
        };

        player.animation_state = current_animation.clone();

        match animating_state.update_by_discriminant(current_animation) {
            TnuaAnimatingStateDirective::Maintain { state } => match state {
                AnimationState::Run(speed) => {
                    for (_, active_animation) in animation_player.playing_animations_mut() {
                        active_animation.set_speed(*speed);
                    }
                }
                // Jumping can be chained, restart the jump animation for the next one.
                AnimationState::JumpStart => {
                    if controller.action_flow_status().just_starting().is_some() {
                        animation_player.seek_all_by(0.0);
                    }
                }
                _ => {}
            },
            TnuaAnimatingStateDirective::Alter { old_state: _, state } => {
                let (clip, speed, repeat) = match state {
                    AnimationState::Idle => (&clips.idle, 1.0, true),
                    AnimationState::Run(speed) => (&clips.run, *speed, true),
                    AnimationState::JumpStart => (&clips.jump_start, 1.0, false),
                    AnimationState::JumpLoop | AnimationState::Fall => {
                        (&clips.jump_loop, 1.0, true)
                    }
                    AnimationState::JumpLand => (&clips.jump_land, 1.0, false),
                    AnimationState::Attack => continue,
                };
                let Some(index) = player.animations.get(clip) else {
                    continue;
                };
                let active = transitions
                    .play(&mut animation_player, *index, blend)
                    .set_speed(speed);
                if repeat {
                    active.repeat();
                }
            }
        }
    }
}

/// Report the end of the attack montage, finished or cut short.
pub fn track_attack_montage(
    players: Query<(Entity, &Player, &AttackState)>,
    animation_players: Query<&AnimationPlayer>,
    mut commands: Commands,
) {
    for (entity, player, attack) in players.iter() {
        let Some(montage) = attack.montage else {
            continue;
        };
        let active = player
            .anim_player_entity
            .and_then(|e| animation_players.get(e).ok())
            .and_then(|animation_player| animation_player.animation(montage));

        let interrupted = match active {
            Some(active) if active.is_finished() => false,
            Some(_) => continue,
            // blended out or the animation player went away
            None => true,
        };
        commands.trigger(MontageEnded {
            entity,
            montage,
            interrupted,
        });
    }
}
