use crux_core::testing::AppTester;
use weather_shared::{
    App, AppConfig, Effect, Event, Model, Screen, SwipeConfig, SwipeDirection, SwipeGesture,
};

fn swipe(direction: SwipeDirection) -> Event {
    Event::Swiped(SwipeGesture::new(direction, 0.8, 150.0))
}

fn renders(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Render(_)))
}

#[test]
fn swipe_left_walks_to_weekly_and_stops() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    assert_eq!(app.view(&model).active_screen, Screen::Currently);

    let update = app.update(swipe(SwipeDirection::Left), &mut model);
    assert!(renders(&update.effects));
    assert_eq!(app.view(&model).active_screen, Screen::Today);

    app.update(swipe(SwipeDirection::Left), &mut model);
    app.update(swipe(SwipeDirection::Left), &mut model);
    assert_eq!(app.view(&model).active_screen, Screen::Weekly);

    let update = app.update(swipe(SwipeDirection::Left), &mut model);
    assert!(!renders(&update.effects));
    assert_eq!(app.view(&model).active_screen, Screen::Weekly);
}

#[test]
fn slow_gesture_is_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let slow = Event::Swiped(SwipeGesture::new(SwipeDirection::Left, 0.1, 200.0));
    let update = app.update(slow, &mut model);
    assert!(update.effects.is_empty());
    assert_eq!(model.navigator.active(), Screen::Currently);
}

#[test]
fn tab_selection_and_swipe_back() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::TabSelected(Screen::Weekly), &mut model);
    app.update(swipe(SwipeDirection::Right), &mut model);

    let view = app.view(&model);
    assert_eq!(view.active_screen, Screen::Today);
    let active: Vec<_> = view.screens.iter().filter(|s| s.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].label, "Today");
}

#[test]
fn configured_thresholds_apply() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let mut config = AppConfig::default();
    config.swipe = SwipeConfig {
        velocity_threshold: 0.05,
        directional_offset_threshold: 20.0,
    };
    app.update(Event::Configure(config), &mut model);

    let gentle = Event::Swiped(SwipeGesture::new(SwipeDirection::Left, 0.1, 30.0));
    app.update(gentle, &mut model);
    assert_eq!(model.navigator.active(), Screen::Today);
}
