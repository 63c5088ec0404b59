//! End-to-end stat card lifecycle on a headless surface.

use std::rc::Rc;

use spark_reveal::{
    mount_stat_card, AnimationConfig, CountUpPhase, HeadlessSurface, MountGroup, Rect,
    RevealFrame, StatCardProps,
};

fn page() -> Rc<HeadlessSurface> {
    Rc::new(HeadlessSurface::new(1280.0, 720.0))
}

#[test]
fn halfway_through_shows_half_the_target() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));
    let card = mount_stat_card(&surface, StatCardProps::new(el, 1247)).unwrap();

    surface.advance(0.0);
    surface.advance(750.0);
    assert_eq!(card.current(), 623);
    assert_eq!(card.phase(), CountUpPhase::Running { started_at: 0.0 });
}

#[test]
fn values_never_decrease_and_end_on_target() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));
    let card = mount_stat_card(&surface, StatCardProps::new(el, 1247)).unwrap();

    // Jittery frame clock
    let mut now = 0.0;
    let mut last = 0;
    let mut step = 0;
    while card.is_animating() {
        surface.advance(now);
        assert!(card.current() >= last);
        last = card.current();
        now += [7.0, 16.7, 33.3, 50.0][step % 4];
        step += 1;
        assert!(step < 1000, "animation never terminated");
    }
    assert_eq!(card.current(), 1247);
    assert_eq!(card.text(), "1,247");
    assert_eq!(card.frame(), RevealFrame::SETTLED);
    assert_eq!(surface.pending_frames(), 0);
}

#[test]
fn never_visible_schedules_no_frames() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 5000.0, 300.0, 90.0));
    let card = mount_stat_card(&surface, StatCardProps::new(el, 15)).unwrap();

    surface.scroll_to(0.0, 1000.0);
    surface.run_frames(0.0, 16.0, 100);
    assert_eq!(card.current(), 0);
    assert_eq!(surface.frames_requested(), 0);
}

#[test]
fn unmount_mid_animation_stops_frames() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));
    let card = mount_stat_card(&surface, StatCardProps::new(el, 1247)).unwrap();

    for i in 0..10 {
        surface.advance(i as f64 * 16.0);
    }
    let fired = surface.frames_fired();
    assert!(card.current() > 0 && card.current() < 1247);

    card.unmount();
    assert_eq!(surface.pending_frames(), 0);
    surface.run_frames(160.0, 16.0, 200);
    assert_eq!(surface.frames_fired(), fired);
}

#[test]
fn dropping_mid_animation_stops_frames() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));
    {
        let _card = mount_stat_card(&surface, StatCardProps::new(el, 1247)).unwrap();
        surface.advance(0.0);
        surface.advance(16.0);
    }
    assert_eq!(surface.pending_frames(), 0);
    assert_eq!(surface.observer_count(), 0);
}

#[test]
fn remount_starts_fresh() {
    let surface = page();
    let el = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));

    let first = mount_stat_card(&surface, StatCardProps::new(el, 99).percentage()).unwrap();
    surface.run_frames(0.0, 16.0, 500);
    assert_eq!(first.text(), "99%");
    first.unmount();

    let second = mount_stat_card(&surface, StatCardProps::new(el, 99).percentage()).unwrap();
    assert_eq!(second.phase(), CountUpPhase::Idle);
    assert_eq!(second.text(), "0%");
    surface.advance(10_000.0);
    assert_eq!(second.phase(), CountUpPhase::Running { started_at: 10_000.0 });
}

#[test]
fn cards_animate_independently() {
    let surface = page();
    let config = AnimationConfig::default();
    let top = surface.insert_element(Rect::new(100.0, 400.0, 300.0, 90.0));
    let low = surface.insert_element(Rect::new(100.0, 1400.0, 300.0, 90.0));

    let a = mount_stat_card(&surface, StatCardProps::from_config(top, 1247, &config).unwrap()).unwrap();
    let b = mount_stat_card(&surface, StatCardProps::from_config(low, 15, &config).unwrap()).unwrap();

    surface.advance(0.0);
    surface.advance(1000.0);
    assert!(a.current() > 0);
    assert_eq!(b.phase(), CountUpPhase::Idle);

    surface.scroll_to(0.0, 900.0);
    surface.advance(1016.0);
    assert_eq!(b.phase(), CountUpPhase::Running { started_at: 1016.0 });

    surface.run_frames(1032.0, 16.0, 500);
    assert_eq!(a.text(), "1,247");
    assert_eq!(b.text(), "15");
}

#[test]
fn host_without_intersection_starts_at_mount() {
    let surface = Rc::new(HeadlessSurface::new(1280.0, 720.0).without_intersection());
    let el = surface.insert_element(Rect::new(100.0, 9000.0, 300.0, 90.0));
    let card = mount_stat_card(&surface, StatCardProps::new(el, 15)).unwrap();
    assert!(card.has_fired());
    surface.run_frames(0.0, 16.0, 500);
    assert_eq!(card.current(), 15);
}

#[test]
fn group_teardown_covers_every_card() {
    let surface = page();
    let mut group = MountGroup::new();
    let mut cards = Vec::new();
    for (i, target) in [1247, 15, 99].into_iter().enumerate() {
        let el = surface.insert_element(Rect::new(100.0 + i as f32 * 320.0, 400.0, 300.0, 90.0));
        cards.push(mount_stat_card(&surface, StatCardProps::new(el, target)).unwrap());
    }
    surface.advance(0.0);
    for card in cards {
        group.push(Box::new(move || card.unmount()));
    }
    group.unmount();
    assert_eq!(surface.pending_frames(), 0);
    assert_eq!(surface.observer_count(), 0);
}
