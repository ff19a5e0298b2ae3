//! Tests for bomb fuses and blast victims.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{
        bomb_victims, tick_bomb_fuses, update_bomb_fuses, Bomb, BombExploded, DamageKind, TakeDamage,
    };
    use crate::components::Agent;
    use crate::config::BombConfig;
    use crate::interaction::{InteractableAttached, InteractableThrown};

    fn bomb_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_event::<InteractableThrown>()
            .add_event::<InteractableAttached>()
            .add_event::<TakeDamage>()
            .add_event::<BombExploded>()
            .add_systems(Update, (update_bomb_fuses, tick_bomb_fuses).chain());
        app
    }

    fn lit_bomb(thrower: Option<Entity>) -> Bomb {
        Bomb {
            armed: Some(0.0),
            thrower,
            ..Bomb::from_config(&BombConfig::default())
        }
    }

    #[test]
    fn test_victims_inside_radius_only() {
        let near = Entity::from_raw(1);
        let edge = Entity::from_raw(2);
        let far = Entity::from_raw(3);

        let victims = bomb_victims(
            Vec3::ZERO,
            400.0,
            [
                (near, Vec3::new(50.0, 0.0, 0.0)),
                (edge, Vec3::new(0.0, 0.0, 400.0)),
                (far, Vec3::new(401.0, 0.0, 0.0)),
            ],
        );

        assert_eq!(victims, vec![near, edge]);
    }

    #[test]
    fn test_fuse_only_burns_when_armed() {
        let mut bomb = Bomb::from_config(&BombConfig::default());
        assert!(!bomb.tick(10.0));

        bomb.arm(Entity::from_raw(5));
        assert!(!bomb.tick(1.0));
        assert!(bomb.tick(1.0));
        assert_eq!(bomb.thrower, Some(Entity::from_raw(5)));
    }

    #[test]
    fn test_throw_arms_and_pickup_disarms() {
        let mut app = bomb_app();
        let agent = app.world_mut().spawn(Agent).id();
        let bomb = app
            .world_mut()
            .spawn(Bomb::from_config(&BombConfig::default()))
            .id();

        app.world_mut().send_event(InteractableThrown {
            object: bomb,
            agent,
            direction: Vec3::NEG_Z,
            impulse: Vec3::NEG_Z,
        });
        app.update();
        assert!(app.world().get::<Bomb>(bomb).unwrap().is_armed());

        app.world_mut().send_event(InteractableAttached { object: bomb, agent });
        app.update();
        assert!(!app.world().get::<Bomb>(bomb).unwrap().is_armed());
    }

    #[test]
    fn test_explosion_damages_agents_in_radius_and_despawns() {
        let mut app = bomb_app();
        let thrower = app.world_mut().spawn((Agent, Transform::from_xyz(2000.0, 0.0, 0.0))).id();
        let victim = app.world_mut().spawn((Agent, Transform::from_xyz(100.0, 0.0, 0.0))).id();
        let bomb = app
            .world_mut()
            .spawn((lit_bomb(Some(thrower)), Transform::from_xyz(0.0, 0.0, 0.0)))
            .id();

        app.update();

        assert!(app.world().get_entity(bomb).is_err());

        let damage: Vec<TakeDamage> = app
            .world()
            .resource::<Events<TakeDamage>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].damaged, victim);
        assert_eq!(damage[0].kind, DamageKind::Bomb);
        assert_eq!(damage[0].instigator, Some(thrower));
        assert_eq!(damage[0].causer, Some(bomb));

        let exploded = app.world().resource::<Events<BombExploded>>();
        assert_eq!(exploded.len(), 1);
    }

    #[test]
    fn test_held_bomb_never_explodes() {
        let mut app = bomb_app();
        let holder = app.world_mut().spawn(Agent).id();
        let bomb = app
            .world_mut()
            .spawn((lit_bomb(None), Transform::default(), ChildOf(holder)))
            .id();

        app.update();

        assert!(app.world().get_entity(bomb).is_ok());
        assert!(app.world().resource::<Events<TakeDamage>>().is_empty());
    }
}
