//! Tests for damage intake.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{receive_damage, AgentIncapacitated, DamageKind, TakeDamage};
    use crate::components::{Agent, Incapacitated, PhysicsBody};

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<TakeDamage>()
            .add_event::<AgentIncapacitated>()
            .add_systems(Update, receive_damage);
        app
    }

    fn hit(damaged: Entity, kind: DamageKind) -> TakeDamage {
        TakeDamage {
            damaged,
            amount: 25.0,
            kind,
            instigator: None,
            causer: None,
        }
    }

    fn incapacitated_events(app: &App) -> usize {
        app.world().resource::<Events<AgentIncapacitated>>().len()
    }

    #[test]
    fn test_regular_damage_is_not_terminal() {
        let mut app = damage_app();
        let agent = app.world_mut().spawn(Agent).id();

        for kind in [DamageKind::Physical, DamageKind::Fire, DamageKind::Ice, DamageKind::Electric] {
            app.world_mut().send_event(hit(agent, kind));
        }
        app.update();

        assert!(app.world().get::<Incapacitated>(agent).is_none());
        assert!(app.world().get::<PhysicsBody>(agent).unwrap().simulating);
        assert_eq!(incapacitated_events(&app), 0);
    }

    #[test]
    fn test_bomb_damage_incapacitates() {
        let mut app = damage_app();
        let agent = app.world_mut().spawn(Agent).id();
        app.world_mut().get_mut::<PhysicsBody>(agent).unwrap().velocity = Vec3::new(100.0, 0.0, 0.0);

        app.world_mut().send_event(hit(agent, DamageKind::Bomb));
        app.update();

        assert!(app.world().get::<Incapacitated>(agent).is_some());
        let body = app.world().get::<PhysicsBody>(agent).unwrap();
        assert!(!body.simulating);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(incapacitated_events(&app), 1);
    }

    #[test]
    fn test_two_bombs_same_frame_incapacitate_once() {
        let mut app = damage_app();
        let agent = app.world_mut().spawn(Agent).id();

        app.world_mut().send_event(hit(agent, DamageKind::Bomb));
        app.world_mut().send_event(hit(agent, DamageKind::Bomb));
        app.update();

        assert_eq!(incapacitated_events(&app), 1);
    }

    #[test]
    fn test_already_incapacitated_stays_quiet() {
        let mut app = damage_app();
        let agent = app.world_mut().spawn((Agent, Incapacitated)).id();

        app.world_mut().send_event(hit(agent, DamageKind::Bomb));
        app.update();

        assert_eq!(incapacitated_events(&app), 0);
    }

    #[test]
    fn test_non_agent_target_ignored() {
        let mut app = damage_app();
        let crate_box = app.world_mut().spawn(PhysicsBody::default()).id();

        app.world_mut().send_event(hit(crate_box, DamageKind::Bomb));
        app.update();

        assert!(app.world().get::<Incapacitated>(crate_box).is_none());
        assert_eq!(incapacitated_events(&app), 0);
    }
}
