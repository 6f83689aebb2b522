//! Bullet movement, culling and hits against the player
//!
//! One pass per tick over the enemy's bullets: steer, integrate, cull
//! anything that left the viewport, then test what remains against the
//! player's hitbox.

use super::bullet::Bullet;
use super::state::Player;
use crate::settings::HitPolicy;

/// What happened during one bullet pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletPass {
    /// Bullets removed for leaving the viewport
    pub despawned: usize,
    /// Damage of every hit that got through invincibility, in bullet order
    pub hits: Vec<i32>,
    /// Bullets removed because their hit was consumed
    pub consumed: usize,
}

/// Advance every bullet one tick and resolve hits.
///
/// The player's center is sampled once before the pass so homing bullets
/// all steer toward the same point.
pub fn update_bullets(
    bullets: &mut Vec<Bullet>,
    player: &mut Player,
    viewport: (i32, i32),
    policy: HitPolicy,
) -> BulletPass {
    let (width, height) = viewport;
    let target = player.rect.center_f32();
    let mut pass = BulletPass::default();

    bullets.retain_mut(|bullet| {
        bullet.steer(target);
        bullet.advance();

        let hitbox = bullet.hitbox();
        if hitbox.is_outside_viewport(width, height) {
            pass.despawned += 1;
            return false;
        }

        if hitbox.intersects(&player.rect) && player.take_damage(bullet.damage) {
            log::debug!("Player hit for {} (hp {})", bullet.damage, player.hp);
            pass.hits.push(bullet.damage);
            if policy == HitPolicy::Consume {
                pass.consumed += 1;
                return false;
            }
        }

        true
    });

    pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::{BulletBehavior, BulletColor, Rect};
    use glam::Vec2;

    const VIEWPORT: (i32, i32) = (SCREEN_WIDTH, SCREEN_HEIGHT);

    fn player() -> Player {
        Player::new(&Settings::default())
    }

    #[test]
    fn test_falling_bullet_despawns_below_screen() {
        // Far from the player so only culling matters
        let start_y = (ARENA_Y - BULLET_SIZE) as f32;
        let mut bullets = vec![Bullet::new(
            Vec2::new(210.0, start_y),
            Vec2::new(0.0, 3.0),
            BulletColor::Yellow,
        )];
        let mut p = player();

        // First tick whose snapped top is past the bottom edge
        let expected = (1..)
            .find(|&n: &u32| (start_y + 3.0 * n as f32) as i32 > SCREEN_HEIGHT)
            .unwrap();

        let mut ticks = 0;
        while !bullets.is_empty() {
            ticks += 1;
            let pass = update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::Consume);
            if bullets.is_empty() {
                assert_eq!(pass.despawned, 1);
            }
            assert!(ticks <= 1000);
        }
        assert_eq!(ticks, expected);
        assert_eq!(ticks, 137);
    }

    #[test]
    fn test_hit_consumes_bullet() {
        let mut p = player();
        let mut bullets = vec![Bullet::new(
            Vec2::new(395.0, 340.0),
            Vec2::new(0.0, 1.0),
            BulletColor::Orange,
        )];
        let pass = update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::Consume);
        assert_eq!(pass.hits, vec![BULLET_DAMAGE]);
        assert_eq!(pass.consumed, 1);
        assert!(bullets.is_empty());
        assert_eq!(p.hp, PLAYER_HP - BULLET_DAMAGE);
        assert!(p.invincible);
    }

    #[test]
    fn test_invincible_player_is_not_hit() {
        let mut p = player();
        p.take_damage(0);
        let mut bullets = vec![Bullet::new(
            Vec2::new(395.0, 340.0),
            Vec2::ZERO,
            BulletColor::Orange,
        )];
        let pass = update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::Consume);
        assert!(pass.hits.is_empty());
        // Blocked hits never consume
        assert_eq!(bullets.len(), 1);
        assert_eq!(p.hp, PLAYER_HP);
    }

    #[test]
    fn test_pass_through_keeps_bullet() {
        let mut p = player();
        let mut bullets = vec![
            Bullet::new(Vec2::new(395.0, 340.0), Vec2::ZERO, BulletColor::Blue),
            Bullet::new(Vec2::new(396.0, 341.0), Vec2::ZERO, BulletColor::Blue),
        ];
        let pass = update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::PassThrough);
        // Second overlapping bullet lands inside the invincibility window
        assert_eq!(pass.hits.len(), 1);
        assert_eq!(bullets.len(), 2);
        assert_eq!(p.hp, PLAYER_HP - BULLET_DAMAGE);
    }

    #[test]
    fn test_homing_steers_toward_player_center() {
        let mut p = player();
        p.rect = Rect::new(500, 400, 20, 20);
        let start = Vec2::new(300.0, 250.0);
        let mut bullets = vec![
            Bullet::new(start, Vec2::ZERO, BulletColor::Pink)
                .with_behavior(BulletBehavior::Homing),
        ];
        update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::Consume);

        let target = Vec2::new(510.0, 410.0);
        let delta = target - start;
        let expected_vel = Vec2::ZERO + (delta / delta.length() * 2.0 - Vec2::ZERO) * 0.1;
        assert_eq!(bullets[0].vel, expected_vel);
        assert_eq!(bullets[0].pos, start + expected_vel);
    }

    #[test]
    fn test_zigzag_updates_every_pass() {
        let mut p = player();
        let mut bullets = vec![
            Bullet::new(Vec2::new(250.0, 210.0), Vec2::new(2.0, 0.0), BulletColor::Purple)
                .with_behavior(BulletBehavior::Zigzag { timer: 0 }),
        ];
        for _ in 0..20 {
            update_bullets(&mut bullets, &mut p, VIEWPORT, HitPolicy::Consume);
        }
        assert_eq!(bullets[0].vel.x, -2.0);
        assert_eq!(bullets[0].behavior, BulletBehavior::Zigzag { timer: 20 });
        // 19 ticks right, then 1 tick left
        assert!((bullets[0].pos.x - 286.0).abs() < 1e-4);
    }
}
