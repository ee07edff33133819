//! Scoreboard
//!
//! Points arrive through `ScoreEvent`s, possibly from a thread other than the
//! one running the frame, so the counters sit behind an `RwLock`. The
//! listener only bumps a counter and marks the board dirty. The per-frame
//! update takes a snapshot once the board is dirty, and every scoreboard
//! entity that has not seen that snapshot gets its text and geometry rebuilt.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::components::{ScoreLabel, Spatial};
use super::entity::{Entity, SystemId};
use super::event::{EventBus, Message, MessageKind, Side};
use super::systems::{Frame, System};
use super::world::World;
use crate::consts::SCORE_GLYPH_WIDTH;
use crate::settings::Settings;

/// Both players' points plus the stale-label flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub left: u32,
    pub right: u32,
    dirty: bool,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award `scorer` a point
    pub fn record(&mut self, scorer: Side) {
        match scorer {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn label(&self) -> String {
        format!("{} vs {}", self.left, self.right)
    }
}

pub type SharedScoreBoard = Arc<RwLock<ScoreBoard>>;

/// Keeps the scoreboard entity's label and size in sync with the points
#[derive(Debug)]
pub struct ScoreSystem {
    board: SharedScoreBoard,
    field_width: f32,
    /// Last label built from the board; `None` until the first point
    label: Option<String>,
    /// Bumped on every snapshot
    generation: u64,
    /// Snapshot generation each entity was last updated with
    applied: HashMap<Entity, u64>,
}

impl ScoreSystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            board: Arc::new(RwLock::new(ScoreBoard::new())),
            field_width: settings.field_width,
            label: None,
            generation: 0,
            applied: HashMap::new(),
        }
    }

    /// Handle to the shared board
    pub fn board(&self) -> SharedScoreBoard {
        Arc::clone(&self.board)
    }

    fn read(&self) -> RwLockReadGuard<'_, ScoreBoard> {
        self.board.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScoreBoard> {
        self.board.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the cached label if points came in since the last frame
    fn refresh(&mut self) {
        if !self.read().is_dirty() {
            return;
        }
        // Re-check under the write lock: a point recorded between the two
        // locks is then included in this snapshot.
        let snapshot = {
            let mut board = self.write();
            if !board.dirty {
                return;
            }
            board.dirty = false;
            *board
        };
        log::debug!("Score is now {}", snapshot.label());
        self.label = Some(snapshot.label());
        self.generation += 1;
    }
}

impl System for ScoreSystem {
    fn id(&self) -> SystemId {
        SystemId::Score
    }

    fn subscribe(&self, bus: &mut EventBus) {
        let board = self.board();
        bus.subscribe(MessageKind::Score, move |message, _, _| {
            let Message::Score(event) = message else {
                return;
            };
            board
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .record(event.scorer);
        });
    }

    fn update(&mut self, entity: Entity, world: &mut World, _bus: &EventBus, _frame: &Frame<'_>) {
        self.refresh();
        let Some(text) = &self.label else {
            return;
        };
        if self.applied.get(&entity) == Some(&self.generation)
            || !world.has_component::<Spatial>(entity)
        {
            return;
        }
        let Some(label) = world.get_component_mut::<ScoreLabel>(entity) else {
            return;
        };
        label.text.clone_from(text);

        let width = text.chars().count() as f32 * SCORE_GLYPH_WIDTH;
        if let Some(spatial) = world.get_component_mut::<Spatial>(entity) {
            spatial.width = width;
            spatial.position.x = self.field_width / 2.0 - width / 2.0;
        }
        self.applied.insert(entity, self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NoInput;
    use crate::sim::event::ScoreEvent;
    use glam::Vec2;

    fn scoreboard(world: &mut World) -> Entity {
        let e = world.create_entity(&[SystemId::Score]);
        world
            .add_component(e, Spatial::new(Vec2::new(100.0, 100.0), 100.0, 100.0))
            .unwrap();
        world.add_component(e, ScoreLabel::new(" ")).unwrap();
        e
    }

    fn setup() -> (ScoreSystem, World, EventBus, Entity) {
        let system = ScoreSystem::new(&Settings::default());
        let mut bus = EventBus::new();
        system.subscribe(&mut bus);
        let mut world = World::new();
        let e = scoreboard(&mut world);
        (system, world, bus, e)
    }

    fn run(system: &mut ScoreSystem, world: &mut World, bus: &EventBus, e: Entity) {
        let frame = Frame {
            dt: 1.0 / 60.0,
            input: &NoInput,
        };
        system.update(e, world, bus, &frame);
    }

    #[test]
    fn test_record() {
        let mut board = ScoreBoard::new();
        assert!(!board.is_dirty());
        board.record(Side::Right);
        board.record(Side::Right);
        board.record(Side::Left);
        assert!(board.is_dirty());
        assert_eq!((board.left, board.right), (1, 2));
        assert_eq!(board.label(), "1 vs 2");
    }

    #[test]
    fn test_label_untouched_before_first_point() {
        let (mut system, mut world, bus, e) = setup();
        run(&mut system, &mut world, &bus, e);
        assert_eq!(world.get_component::<ScoreLabel>(e).unwrap().text, " ");
    }

    #[test]
    fn test_dirty_clean_cycle() {
        let (mut system, mut world, bus, e) = setup();
        for _ in 0..3 {
            bus.dispatch(&ScoreEvent { scorer: Side::Left }.into(), &mut world);
        }
        assert!(system.board().read().unwrap().is_dirty());

        run(&mut system, &mut world, &bus, e);

        assert!(!system.board().read().unwrap().is_dirty());
        assert_eq!(world.get_component::<ScoreLabel>(e).unwrap().text, "3 vs 0");
        let spatial = world.get_component::<Spatial>(e).unwrap();
        // "3 vs 0" is six characters wide
        assert_eq!(spatial.width, 120.0);
        assert_eq!(spatial.position.x, 340.0);
        assert_eq!(spatial.position.y, 100.0);
    }

    #[test]
    fn test_geometry_follows_new_score_when_text_already_matches() {
        let (mut system, mut world, bus, e) = setup();
        bus.dispatch(&ScoreEvent { scorer: Side::Left }.into(), &mut world);
        // The host wrote the upcoming text itself; size and position are stale
        world.get_component_mut::<ScoreLabel>(e).unwrap().text = "1 vs 0".to_string();

        run(&mut system, &mut world, &bus, e);

        let spatial = world.get_component::<Spatial>(e).unwrap();
        assert_eq!(spatial.width, 120.0);
        assert_eq!(spatial.position.x, 340.0);

        // Already applied: a later host resize sticks until the next point
        world.get_component_mut::<Spatial>(e).unwrap().width = 50.0;
        run(&mut system, &mut world, &bus, e);
        assert_eq!(world.get_component::<Spatial>(e).unwrap().width, 50.0);

        bus.dispatch(&ScoreEvent { scorer: Side::Left }.into(), &mut world);
        run(&mut system, &mut world, &bus, e);
        assert_eq!(world.get_component::<ScoreLabel>(e).unwrap().text, "2 vs 0");
        assert_eq!(world.get_component::<Spatial>(e).unwrap().width, 120.0);
    }

    #[test]
    fn test_skips_entity_without_label() {
        let (mut system, mut world, bus, _) = setup();
        let bare = world.create_entity(&[SystemId::Score]);
        world
            .add_component(bare, Spatial::new(Vec2::ZERO, 1.0, 1.0))
            .unwrap();
        bus.dispatch(&ScoreEvent { scorer: Side::Right }.into(), &mut world);

        run(&mut system, &mut world, &bus, bare);
        assert_eq!(world.get_component::<Spatial>(bare).unwrap().width, 1.0);
    }

    #[test]
    fn test_concurrent_points_are_not_lost() {
        let (mut system, mut world, bus, e) = setup();
        let board = system.board();

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let board = Arc::clone(&board);
                std::thread::spawn(move || {
                    let side = if i % 2 == 0 { Side::Left } else { Side::Right };
                    for _ in 0..250 {
                        board.write().unwrap().record(side);
                    }
                })
            })
            .collect();

        for _ in 0..100 {
            run(&mut system, &mut world, &bus, e);
        }
        for writer in writers {
            writer.join().unwrap();
        }
        run(&mut system, &mut world, &bus, e);

        assert_eq!(world.get_component::<ScoreLabel>(e).unwrap().text, "500 vs 500");
    }
}
