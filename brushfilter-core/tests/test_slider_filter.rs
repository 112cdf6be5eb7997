mod util;

#[cfg(test)]
mod tests {
    use crate::util::{init_logging, Fixture, RecordingUpdater};
    use brushfilter_core::error::BrushFilterError;
    use brushfilter_core::interaction::filter::{ChannelScales, SliderFilter};
    use brushfilter_core::interaction::slider::{Slider, SliderGroup};
    use brushfilter_core::scale::{BandScale, ContinuousScale, ScaleDomain};
    use brushfilter_core::{Cartesian, Channel, Orientation, SliderFilterConfig};
    use serde_json::json;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    fn linear_scales() -> ChannelScales {
        ChannelScales::new(
            ContinuousScale::linear(0.0, 100.0),
            ContinuousScale::linear(0.0, 300.0),
        )
    }

    fn plot() -> Cartesian {
        Cartesian::new(0.0, 0.0, 400.0, 300.0)
    }

    fn unthrottled() -> SliderFilter {
        SliderFilter::new(SliderFilterConfig {
            wait: 0,
            leading: true,
            trailing: false,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_continuous_selection_filters_x() {
        init_logging();
        let fixture = Fixture::new(RecordingUpdater::default());
        let (session, mut worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));
        assert_eq!(session.listener_count(), 2);

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        assert!(session.is_filtering());
        worker.step().await.unwrap().unwrap();
        assert!(!session.is_filtering());

        assert_eq!(fixture.updater.count(), 1);
        assert_eq!(fixture.updater.last_domain("x"), json!([20.0, 60.0]));
        assert_eq!(fixture.updater.last_domain("y"), json!([0.0, 300.0]));
        assert_eq!(
            session.channel_domain(Channel::X),
            Some(ScaleDomain::Interval([20.0, 60.0]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_filtered_spec_shape() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let (_session, mut worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        worker.step().await.unwrap().unwrap();

        let spec = fixture.updater.last();
        assert_eq!(spec.clip, Some(true));
        assert_eq!(spec.animate, Some(json!(false)));
        assert_eq!(spec.extra.get("type"), Some(&json!("view")));

        let mark = &spec.marks[0];
        assert_eq!(mark.type_, "interval");
        assert_eq!(mark.animate, Some(json!(false)));
        assert_eq!(
            mark.slider,
            Some(json!({
                "x": {"preserve": true},
                "y": {"values": [0.1, 0.9], "preserve": true}
            }))
        );
        assert_eq!(
            mark.axis,
            Some(json!({
                "x": {"transform": [{"type": "hide"}]},
                "y": {"transform": [{"type": "hide"}], "title": "Sold"}
            }))
        );
        assert_eq!(mark.encode, Some(json!({"x": "genre", "y": "sold"})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ordinal_selection_includes_partial_bands() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let scales = ChannelScales::new(
            BandScale::new(vec![json!("a"), json!("b"), json!("c"), json!("d")]),
            ContinuousScale::linear(0.0, 300.0),
        );
        let (session, mut worker) = unthrottled().attach(fixture.context(scales, plot()));

        fixture.horizontal.dispatch_value_change(0.0, 0.5);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.last_domain("x"), json!(["a", "b"]));

        fixture.horizontal.dispatch_value_change(0.3, 0.6);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.last_domain("x"), json!(["b", "c"]));
        assert_eq!(
            session.channel_domain(Channel::X),
            Some(ScaleDomain::Categories(vec![json!("b"), json!("c")]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transposed_coordinate_swaps_and_reverses() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let scales = ChannelScales::new(
            ContinuousScale::linear(0.0, 100.0),
            ContinuousScale::linear(0.0, 100.0),
        );
        let (_session, mut worker) =
            unthrottled().attach(fixture.context(scales, plot().transpose()));

        // Horizontal slider drives y, mirrored
        fixture.horizontal.dispatch_value_change(0.0, 0.25);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.last_domain("y"), json!([75.0, 100.0]));
        assert_eq!(fixture.updater.last_domain("x"), json!([0.0, 100.0]));

        // Vertical slider drives x, as is
        fixture.vertical.dispatch_value_change(0.25, 0.75);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.last_domain("x"), json!([25.0, 75.0]));
        assert_eq!(fixture.updater.last_domain("y"), json!([75.0, 100.0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leading_throttle_fires_once_per_window() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let (_session, mut worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        fixture.horizontal.dispatch_value_change(0.3, 0.6);
        fixture.horizontal.dispatch_value_change(0.4, 0.6);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.count(), 1);
        assert_eq!(fixture.updater.last_domain("x"), json!([20.0, 60.0]));

        sleep(Duration::from_millis(10)).await;
        fixture.horizontal.dispatch_value_change(0.5, 0.6);
        sleep(Duration::from_millis(50)).await;
        fixture.horizontal.dispatch_value_change(0.25, 0.75);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.count(), 2);
        assert_eq!(fixture.updater.last_domain("x"), json!([25.0, 75.0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trailing_throttle_fires_latest_value() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let filter = SliderFilter::new(SliderFilterConfig {
            wait: 50,
            leading: false,
            trailing: true,
        });
        let (_session, mut worker) = filter.attach(fixture.context(linear_scales(), plot()));

        let start = Instant::now();
        fixture.horizontal.dispatch_value_change(0.1, 0.2);
        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        assert_eq!(fixture.updater.count(), 0);

        worker.step().await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(fixture.updater.count(), 1);
        assert_eq!(fixture.updater.last_domain("x"), json!([20.0, 60.0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_discards_pending_trailing_value() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let filter = SliderFilter::new(SliderFilterConfig {
            wait: 50,
            leading: false,
            trailing: true,
        });
        let (mut session, mut worker) = filter.attach(fixture.context(linear_scales(), plot()));

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        session.detach();
        assert!(worker.step().await.is_none());
        assert_eq!(fixture.updater.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_during_update_are_dropped() {
        init_logging();
        let fixture = Fixture::new(RecordingUpdater::with_delay(Duration::from_millis(100)));
        let (session, mut worker) = unthrottled().attach(fixture.context(linear_scales(), plot()));

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        let (result, _) = tokio::join!(worker.step(), async {
            sleep(Duration::from_millis(10)).await;
            assert!(session.is_filtering());
            fixture.vertical.dispatch_value_change(0.0, 0.5);
        });
        result.unwrap().unwrap();
        assert_eq!(fixture.updater.count(), 1);
        assert_eq!(
            session.channel_domain(Channel::Y),
            Some(ScaleDomain::Interval([0.0, 300.0]))
        );

        // Once idle, the other channel filters and the first one keeps its domain
        fixture.vertical.dispatch_value_change(0.0, 0.5);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.count(), 2);
        assert_eq!(fixture.updater.last_domain("x"), json!([20.0, 60.0]));
        assert_eq!(fixture.updater.last_domain("y"), json!([0.0, 150.0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_update_releases_in_flight_flag() {
        let fixture = Fixture::new(RecordingUpdater::default());
        fixture.updater.fail.set(true);
        let (session, mut worker) = unthrottled().attach(fixture.context(linear_scales(), plot()));

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        let err = worker.step().await.unwrap().unwrap_err();
        assert!(matches!(err, BrushFilterError::UpdateError(..)));
        assert!(err.to_string().contains("Updating chart for x slider"));
        assert!(!session.is_filtering());

        fixture.updater.fail.set(false);
        fixture.horizontal.dispatch_value_change(0.25, 0.75);
        worker.step().await.unwrap().unwrap();
        assert_eq!(fixture.updater.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_removes_listeners() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let (mut session, mut worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));
        assert_eq!(fixture.horizontal.listener_count(), 1);
        assert_eq!(fixture.vertical.listener_count(), 1);

        session.detach();
        session.detach();
        assert!(!session.is_attached());
        assert_eq!(session.listener_count(), 0);
        assert_eq!(session.channel_domain(Channel::X), None);
        assert_eq!(fixture.horizontal.listener_count(), 0);
        assert_eq!(fixture.vertical.listener_count(), 0);

        fixture.horizontal.dispatch_value_change(0.2, 0.6);
        assert!(worker.step().await.is_none());
        assert_eq!(fixture.updater.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_attach_does_not_leak_listeners() {
        let fixture = Fixture::new(RecordingUpdater::default());
        for _ in 0..3 {
            let (mut session, _worker) =
                SliderFilter::default().attach(fixture.context(linear_scales(), plot()));
            assert_eq!(fixture.horizontal.listener_count(), 1);
            session.detach();
        }
        assert_eq!(fixture.horizontal.listener_count(), 0);
        assert_eq!(fixture.vertical.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_session_detaches() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let (session, _worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));
        drop(session);
        assert_eq!(fixture.horizontal.listener_count(), 0);
        assert_eq!(fixture.vertical.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sliders_is_inactive() {
        let mut fixture = Fixture::new(RecordingUpdater::default());
        fixture.group = Rc::new(SliderGroup::new());
        fixture
            .group
            .append(Rc::new(Slider::with_class_names(Orientation::Horizontal, &["legend"])));

        let (session, mut worker) =
            SliderFilter::default().attach(fixture.context(linear_scales(), plot()));
        assert!(!session.is_attached());
        assert_eq!(session.listener_count(), 0);
        assert!(worker.step().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_detached() {
        let fixture = Fixture::new(RecordingUpdater::default());
        let (mut session, worker) =
            unthrottled().attach(fixture.context(linear_scales(), plot()));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let handle = tokio::task::spawn_local(worker.run());
                fixture.horizontal.dispatch_value_change(0.2, 0.6);
                sleep(Duration::from_millis(1)).await;
                assert_eq!(fixture.updater.count(), 1);

                fixture.updater.fail.set(true);
                fixture.horizontal.dispatch_value_change(0.25, 0.75);
                sleep(Duration::from_millis(1)).await;
                assert_eq!(fixture.updater.count(), 2);
                assert!(!session.is_filtering());

                session.detach();
                handle.await.unwrap();
            })
            .await;
    }
}
