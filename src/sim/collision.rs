//! Collision detection and scoring
//!
//! Brute-force pairwise AABB tests, resolved once per frame in a fixed order:
//! bullets vs asteroids, bullets vs enemy ships, player vs power-ups, enemy
//! bullets vs player, asteroids vs player. Hits are flagged first and the
//! collections filtered afterwards, so nothing is removed mid-iteration.

use super::entities::Damage;
use super::rect::Rect;
use super::state::GameState;
use crate::audio::{AudioCue, SoundEffect};

/// What happened during one resolver pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub asteroids_destroyed: u32,
    pub ships_destroyed: u32,
    pub points: u64,
    pub powerups_collected: u32,
    pub shield_absorbed: bool,
    pub player_destroyed: bool,
}

/// Drop every element whose flag is set
fn retain_unflagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !flags[i];
        i += 1;
        keep
    });
}

/// Pair each bullet with at most one target: the first live one it overlaps
///
/// Returns (bullet flags, target flags, indices of targets hit in order).
fn match_hits(bullets: &[Rect], targets: &[Rect]) -> (Vec<bool>, Vec<bool>, Vec<usize>) {
    let mut spent = vec![false; bullets.len()];
    let mut destroyed = vec![false; targets.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let found = targets
            .iter()
            .enumerate()
            .find(|(ti, target)| !destroyed[*ti] && bullet.intersects(target));
        if let Some((ti, _)) = found {
            spent[bi] = true;
            destroyed[ti] = true;
            hits.push(ti);
        }
    }

    (spent, destroyed, hits)
}

fn bullets_vs_asteroids(state: &mut GameState, report: &mut CollisionReport) {
    let bullet_rects: Vec<Rect> = state.bullets.iter().map(|b| b.rect()).collect();
    let asteroid_rects: Vec<Rect> = state.asteroids.iter().map(|a| a.rect()).collect();
    let (spent, destroyed, hits) = match_hits(&bullet_rects, &asteroid_rects);
    if hits.is_empty() {
        return;
    }

    let burst = state.tuning().asteroid_burst;
    let per_level = state.tuning().asteroid_points;
    for ti in hits {
        let (center, level) = (asteroid_rects[ti].center(), state.asteroids[ti].level);
        state.burst(center, burst);
        let points = per_level * level as u64;
        state.award(points);
        state.emit(AudioCue::Effect(SoundEffect::AsteroidExplosion));
        report.asteroids_destroyed += 1;
        report.points += points;
    }

    retain_unflagged(&mut state.bullets, &spent);
    retain_unflagged(&mut state.asteroids, &destroyed);
}

fn bullets_vs_ships(state: &mut GameState, report: &mut CollisionReport) {
    let bullet_rects: Vec<Rect> = state.bullets.iter().map(|b| b.rect()).collect();
    let ship_rects: Vec<Rect> = state.enemy_ships.iter().map(|e| e.rect()).collect();
    let (spent, destroyed, hits) = match_hits(&bullet_rects, &ship_rects);
    if hits.is_empty() {
        return;
    }

    let burst = state.tuning().enemy_ship_burst;
    let per_level = state.tuning().enemy_ship_points;
    for ti in hits {
        let (center, level) = (ship_rects[ti].center(), state.enemy_ships[ti].level);
        state.burst(center, burst);
        let points = per_level * level as u64;
        state.award(points);
        state.emit(AudioCue::Effect(SoundEffect::ShipExplosion));
        report.ships_destroyed += 1;
        report.points += points;
    }

    retain_unflagged(&mut state.bullets, &spent);
    retain_unflagged(&mut state.enemy_ships, &destroyed);
}

/// Power-ups are collected by touching them; bullets pass through
fn player_vs_powerups(state: &mut GameState, report: &mut CollisionReport) {
    let player = state.player.rect();
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if player.intersects(&p.rect()) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.collect_powerup(kind);
        report.powerups_collected += 1;
        log::debug!("collected {:?}", kind);
    }
}

/// Shield absorbed a hit: small burst, no score change
fn shield_hit(state: &mut GameState, report: &mut CollisionReport) {
    let (center, burst) = (state.player.center(), state.tuning().shield_hit_burst);
    state.burst(center, burst);
    state.emit(AudioCue::Effect(SoundEffect::ShieldHit));
    report.shield_absorbed = true;
}

fn destroy_player(state: &mut GameState, report: &mut CollisionReport) {
    let (center, burst) = (state.player.center(), state.tuning().player_death_burst);
    state.burst(center, burst);
    state.end_run();
    report.player_destroyed = true;
}

/// At most one enemy bullet connects per frame
fn enemy_bullets_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let player = state.player.rect();
    let Some(index) = state
        .enemy_bullets
        .iter()
        .position(|b| b.rect().intersects(&player))
    else {
        return;
    };
    state.enemy_bullets.remove(index);

    match state.player.take_damage() {
        Damage::ShieldAbsorbed => shield_hit(state, report),
        Damage::Destroyed => destroy_player(state, report),
    }
}

/// Asteroid contact ignores the shield unless tuning says otherwise
fn asteroids_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let player = state.player.rect();
    let Some(index) = state
        .asteroids
        .iter()
        .position(|a| a.rect().intersects(&player))
    else {
        return;
    };

    if state.tuning().shield_absorbs_asteroids && state.player.has_shield {
        state.player.take_damage();
        state.asteroids.remove(index);
        shield_hit(state, report);
    } else {
        destroy_player(state, report);
    }
}

/// Run every collision rule for this frame
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    bullets_vs_asteroids(state, &mut report);
    bullets_vs_ships(state, &mut report);
    player_vs_powerups(state, &mut report);
    enemy_bullets_vs_player(state, &mut report);
    if !state.is_game_over() {
        asteroids_vs_player(state, &mut report);
    }

    report
}
