//! End-to-end scenarios across the element → handler → movement stack.

use glam::Vec3;
use movement_core::{
    DirectionHandler, ErrorKind, MovementEntry, MovementHandler, SpeedHandler, StackableElement,
    Tag,
};

/// Identifier scheme a hosting game would typically supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SpeedId {
    Base,
    Slow(u8),
    Sprint,
}

#[test]
fn base_speed_with_stacked_slow_goes_negative() {
    let mut speeds: SpeedHandler<SpeedId> = SpeedHandler::new();
    speeds.try_add(
        SpeedId::Base,
        StackableElement::with_stack(5.0, 1, false)
            .unwrap()
            .with_tag(Tag::BASIC),
    );
    speeds.try_add(
        SpeedId::Slow(3),
        StackableElement::with_stack(-2.0, 3, false)
            .unwrap()
            .with_tag(Tag::ENVIRONMENTAL),
    );

    // 5 × 1 + (-2) × 3
    assert_eq!(speeds.aggregate(), -1.0);
}

#[test]
fn unit_direction_with_speed_aggregate_yields_axis_velocity() {
    let mut speeds: SpeedHandler<SpeedId> = SpeedHandler::new();
    speeds.try_add(SpeedId::Base, StackableElement::with_stack(4.0, 1, false).unwrap());

    let mut directions: DirectionHandler<SpeedId> = DirectionHandler::new();
    directions.try_add(
        SpeedId::Base,
        StackableElement::with_stack(Vec3::X, 1, false).unwrap(),
    );

    let mut movement: MovementHandler<&str, SpeedId> = MovementHandler::new();
    movement.try_add("walk", MovementEntry::aggregated(speeds, directions));

    assert_eq!(movement.velocity(), Vec3::new(4.0, 0.0, 0.0));
}

#[test]
fn buff_lifecycle_registers_stacks_and_expires() {
    let mut speeds: SpeedHandler<SpeedId> = SpeedHandler::new();
    speeds.try_add(SpeedId::Base, StackableElement::with_stack(5.0, 1, false).unwrap());

    // Buff applied: one sprint element, stacked twice over its lifetime.
    assert!(speeds.try_add(SpeedId::Sprint, StackableElement::new(1.5, false)));
    assert_eq!(
        speeds.get_mut(&SpeedId::Sprint).unwrap().try_add_stack(2),
        Ok(true)
    );
    assert_eq!(speeds.aggregate(), 8.0);

    // Buff expired: exactly one remove call.
    assert!(speeds.remove(&SpeedId::Sprint));
    assert_eq!(speeds.aggregate(), 5.0);
    assert_eq!(speeds.len(), 1);
}

#[test]
fn toggling_an_entry_swings_the_composite_velocity() {
    let mut movement: MovementHandler<&str, &str> = MovementHandler::new();
    movement.try_add("walk", MovementEntry::fixed(2.0, Vec3::X));
    movement.try_add("gust", MovementEntry::fixed(6.0, Vec3::Y).with_active(false));

    assert_eq!(movement.velocity(), Vec3::new(2.0, 0.0, 0.0));

    movement.set_active(&"gust", true).unwrap();
    assert_eq!(movement.velocity(), Vec3::new(2.0, 6.0, 0.0));

    movement.set_active(&"gust", false).unwrap();
    assert_eq!(movement.velocity(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn frozen_pin_survives_a_debuff_wave() {
    let mut speeds: SpeedHandler<SpeedId> = SpeedHandler::new();
    let mut pinned = StackableElement::with_stack(5.0, 1, false).unwrap();
    pinned.set_frozen(true);
    speeds.try_add(SpeedId::Base, pinned);

    // A wave of stack mutations aimed at every element.
    let result = speeds.set_stack(&SpeedId::Base, 0);
    // Frozen elements swallow the mutation silently: no error, no change.
    assert!(result.is_ok());
    assert_eq!(speeds.get(&SpeedId::Base).unwrap().stack(), 1);
    assert_eq!(speeds.aggregate(), 5.0);
}

#[test]
fn exclusive_slots_act_as_presence_flags() {
    let mut directions: DirectionHandler<&str> = DirectionHandler::new();
    directions.try_add("conveyor", StackableElement::exclusive_on(Vec3::Z * 0.5));

    // Stacking an exclusive element past 1 is refused, not clamped.
    assert_eq!(
        directions.get_mut(&"conveyor").unwrap().try_add_stack(1),
        Ok(false)
    );
    assert_eq!(directions.aggregate(), Vec3::new(0.0, 0.0, 0.5));

    // And constructing one with 2 stacks fails outright.
    let err = StackableElement::with_stack(Vec3::Z, 2, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn per_entity_handlers_never_interfere() {
    let mut hero: MovementHandler<&str, &str> = MovementHandler::new();
    let mut ogre: MovementHandler<&str, &str> = MovementHandler::new();

    hero.try_add("walk", MovementEntry::with_base("base", 3.0, "heading", Vec3::X));
    ogre.try_add("walk", MovementEntry::with_base("base", 1.0, "heading", Vec3::NEG_X));

    // Slowing the ogre's walk leaves the hero untouched.
    ogre.get_mut(&"walk")
        .unwrap()
        .speeds_mut()
        .unwrap()
        .try_add("root", StackableElement::with_stack(-1.0, 1, false).unwrap());

    assert_eq!(hero.velocity(), Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(ogre.velocity(), Vec3::ZERO);
}

#[test]
fn update_tick_recomputes_from_current_state_only() {
    let mut movement: MovementHandler<&str, &str> = MovementHandler::new();
    movement.try_add("walk", MovementEntry::with_base("base", 4.0, "heading", Vec3::X));

    // Tick 1: clean walk.
    assert_eq!(movement.velocity(), Vec3::new(4.0, 0.0, 0.0));

    // Between ticks: a slow lands and is later upgraded in place.
    {
        let speeds = movement.get_mut(&"walk").unwrap().speeds_mut().unwrap();
        speeds.try_add("slow", StackableElement::with_stack(-1.0, 1, false).unwrap());
        speeds.set_stack(&"slow", 3).unwrap();
    }

    // Tick 2: the aggregate reflects exactly the surviving registrations.
    assert_eq!(movement.velocity(), Vec3::new(1.0, 0.0, 0.0));

    // Between ticks: the slow expires.
    movement
        .get_mut(&"walk")
        .unwrap()
        .speeds_mut()
        .unwrap()
        .remove(&"slow");

    // Tick 3: back to the clean walk; nothing was cached.
    assert_eq!(movement.velocity(), Vec3::new(4.0, 0.0, 0.0));
}
