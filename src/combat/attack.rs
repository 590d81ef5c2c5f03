use super::*;
use std::collections::HashMap;
use std::time::Duration;

pub fn plugin(app: &mut App) {
    app.add_observer(handle_attack)
        .add_observer(end_attack_on_montage_end);
}

/// Plays montages through the character's [`AnimationTransitions`], blending out
/// whatever locomotion clip was running.
pub struct GraphMontagePlayer<'a> {
    pub animations: &'a HashMap<String, AnimationNodeIndex>,
    pub animation_player: Mut<'a, AnimationPlayer>,
    pub transitions: Mut<'a, AnimationTransitions>,
    pub blend: Duration,
    pub speed: f32,
}

impl MontagePlayer for GraphMontagePlayer<'_> {
    fn play_montage(&mut self, montage: &str) -> Option<AnimationNodeIndex> {
        let node = *self.animations.get(montage)?;
        self.transitions
            .play(&mut self.animation_player, node, self.blend)
            .set_speed(self.speed);
        Some(node)
    }
}

fn handle_attack(
    on: On<Start<Attack>>,
    cfg: Res<Config>,
    mut attackers: Query<(&Player, &mut AttackState)>,
    mut animation_query: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let Ok((player, mut attack)) = attackers.get_mut(on.context) else {
        return;
    };
    // model or graph not resolved yet: drop the request
    let Some(anim_entity) = player.anim_player_entity else {
        debug!("attack ignored, animations not ready");
        return;
    };
    let Ok((animation_player, transitions)) = animation_query.get_mut(anim_entity) else {
        return;
    };

    let mut animator = GraphMontagePlayer {
        animations: &player.animations,
        animation_player,
        transitions,
        blend: Duration::from_millis(cfg.animation.blend_ms),
        speed: cfg.animation.attack_speed,
    };
    if let Some(node) = attack.request_attack(&cfg.animation.attack_montage, &mut animator) {
        debug!("{}: attack #{} montage {node:?}", on.context, attack.attack_count);
    }
}

fn end_attack_on_montage_end(on: On<MontageEnded>, mut attackers: Query<&mut AttackState>) {
    if let Ok(mut attack) = attackers.get_mut(on.entity) {
        attack.end_montage();
    }
}
