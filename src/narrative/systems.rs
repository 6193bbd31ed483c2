//! Narrative domain: talking to NPCs.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::Player;
use crate::narrative::components::Npc;
use crate::narrative::events::NpcTalkedEvent;
use crate::narrative::resources::{NarrativeState, NarrativeTuning};

/// Nearest NPC within `radius` of `origin`
pub(crate) fn nearest_in_range<'a, I>(origin: Vec2, radius: f32, npcs: I) -> Option<&'a Npc>
where
    I: IntoIterator<Item = (&'a Npc, Vec2)>,
{
    npcs.into_iter()
        .map(|(npc, position)| (npc, position.distance(origin)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(npc, _)| npc)
}

/// E near an NPC plays its lines and records the conversation
pub(crate) fn talk_to_npcs(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<NarrativeTuning>,
    mut narrative: ResMut<NarrativeState>,
    player_query: Query<&Transform, With<Player>>,
    npc_query: Query<(&Npc, &GlobalTransform)>,
    mut talked_events: MessageWriter<NpcTalkedEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok(player_transform) = player_query.single() else {
        return;
    };

    let origin = player_transform.translation.truncate();
    let Some(npc) = nearest_in_range(
        origin,
        tuning.talk_radius,
        npc_query
            .iter()
            .map(|(npc, transform)| (npc, transform.translation().truncate())),
    ) else {
        return;
    };

    for line in &npc.lines {
        info!("[NPC] {}: {}", npc.name, line);
    }

    if narrative.mark_talked(&npc.id) {
        talked_events.write(NpcTalkedEvent {
            npc_id: npc.id.clone(),
        });
    }
}
