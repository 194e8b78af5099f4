//! Full-cycle tests against the in-memory host: snapshot, build, diff,
//! patch, restore, and the event plumbing around it.

use host_api::{HostEvent, HostInput, RenderScheduler, SelectionRange};
use host_mem::{MemHost, MemScheduler};
use runtime_ui::UiRuntime;
use vtree::snapshot::assert_tree_eq;
use vtree::{BuildError, Node, TreeBuilder};

fn expected(f: impl FnOnce(&mut TreeBuilder) -> Result<(), BuildError>) -> Node {
    let mut builder = TreeBuilder::new("body");
    f(&mut builder).expect("fixture build failed");
    builder.finish().expect("fixture finish failed")
}

fn click_on(host: &MemHost, id: &str) -> HostEvent {
    let target = host.find_by_id(id).expect("target element exists");
    HostEvent::Click {
        ancestor_ids: host.ancestor_ids(target),
    }
}

#[test]
fn first_frame_materializes_the_whole_tree() {
    let mut host = MemHost::new("body");
    let mut runtime = UiRuntime::new("body");

    runtime
        .render_frame(&mut host, |b, _| {
            b.with("div", |b| {
                b.attr("id", "app");
                b.style("margin", "0");
                b.text("hello");
                Ok(())
            })
        })
        .unwrap();

    let want = expected(|b| {
        b.with("div", |b| {
            b.attr("id", "app");
            b.style("margin", "0");
            b.text("hello");
            Ok(())
        })
    });
    assert_tree_eq(&want, &host.live_tree());
    assert!(runtime.previous_tree().is_some());
}

#[test]
fn click_queries_answer_true_exactly_once() {
    let mut host = MemHost::new("body");
    let mut scheduler = MemScheduler::new();
    let mut runtime = UiRuntime::new("body");

    let mut observed = Vec::new();
    let frame = |runtime: &mut UiRuntime, host: &mut MemHost, log: &mut Vec<bool>| {
        let mut clicked = false;
        runtime
            .render_frame(host, |b, m| {
                clicked = m.was_clicked("btn");
                b.with("button", |b| {
                    b.attr("id", "btn");
                    b.text("+");
                    Ok(())
                })
            })
            .unwrap();
        log.push(clicked);
    };

    // Frame 1 registers "btn"; no click has happened yet.
    frame(&mut runtime, &mut host, &mut observed);

    runtime.handle_event(&click_on(&host, "btn"), &mut scheduler);
    assert!(scheduler.take_pending(), "a matched click schedules a frame");

    // Frame 2 consumes the pending click; frame 3 sees nothing.
    frame(&mut runtime, &mut host, &mut observed);
    frame(&mut runtime, &mut host, &mut observed);

    assert_eq!(observed, vec![false, true, false]);
}

#[test]
fn unmatched_clicks_do_not_schedule_frames() {
    let mut host = MemHost::new("body");
    let mut scheduler = MemScheduler::new();
    let mut runtime = UiRuntime::new("body");

    runtime
        .render_frame(&mut host, |b, _| {
            b.with("div", |b| {
                b.attr("id", "inert");
                Ok(())
            })
        })
        .unwrap();

    runtime.handle_event(&click_on(&host, "inert"), &mut scheduler);
    assert!(!scheduler.is_pending());

    runtime.handle_event(&HostEvent::NavigationChanged, &mut scheduler);
    assert!(scheduler.take_pending(), "navigation always renders");
}

#[test]
fn repeated_events_coalesce_into_one_pending_frame() {
    let mut host = MemHost::new("body");
    let mut scheduler = MemScheduler::new();
    let mut runtime = UiRuntime::new("body");

    runtime
        .render_frame(&mut host, |b, m| {
            m.was_clicked("btn");
            b.with("button", |b| {
                b.attr("id", "btn");
                Ok(())
            })
        })
        .unwrap();

    runtime.handle_event(&click_on(&host, "btn"), &mut scheduler);
    runtime.handle_event(&click_on(&host, "btn"), &mut scheduler);
    runtime.handle_event(&click_on(&host, "btn"), &mut scheduler);
    assert!(scheduler.take_pending());
    assert!(!scheduler.take_pending(), "requests coalesced");
}

#[test]
fn input_value_survives_replacement_of_its_subtree() {
    let mut host = MemHost::new("body");
    let mut runtime = UiRuntime::new("body");

    // The wrapper tag changes between frames, which replaces the whole
    // subtree (identity mismatch) and recreates the input from scratch.
    let view = |wrapper: &'static str| {
        move |b: &mut TreeBuilder, _: &mut runtime_ui::InteractionMonitor| {
            b.with(wrapper, |b| {
                b.with("input", |b| {
                    b.attr("id", "new-todo");
                    Ok(())
                })
            })
        }
    };

    runtime.render_frame(&mut host, view("div")).unwrap();
    assert!(host.set_input_value("new-todo", "hello"));

    runtime.render_frame(&mut host, view("section")).unwrap();

    let values = host.input_values();
    assert_eq!(
        values,
        vec![("new-todo".to_string(), "hello".to_string())],
        "restore step writes the snapshot back into the fresh element"
    );
}

#[test]
fn programmatic_focus_lands_with_caret_at_end() {
    let mut host = MemHost::new("body");
    let mut runtime = UiRuntime::new("body");
    host.set_focus_scroll((0, 300));
    host.scroll_to(0, 42);

    runtime
        .render_frame(&mut host, |b, m| {
            m.focus("new-todo");
            b.with("input", |b| {
                b.attr("id", "new-todo");
                Ok(())
            })
        })
        .unwrap();
    assert!(host.set_input_value("new-todo", "hello"));

    // Re-focusing resets the sentinel, so the restore step places the
    // caret at the end of the value instead of replaying a snapshot.
    runtime
        .render_frame(&mut host, |b, m| {
            assert!(m.is_focused("new-todo"));
            m.focus("new-todo");
            b.with("input", |b| {
                b.attr("id", "new-todo");
                Ok(())
            })
        })
        .unwrap();

    assert_eq!(host.focused_id(), Some("new-todo"));
    assert_eq!(
        host.selection("new-todo"),
        Some(SelectionRange::caret(5)),
        "sentinel restores the caret at the end of the value"
    );
    assert_eq!(
        host.scroll_offset(),
        (0, 42),
        "focusing must not visibly scroll the view"
    );
}

#[test]
fn live_selection_is_snapshotted_and_restored() {
    let mut host = MemHost::new("body");
    let mut runtime = UiRuntime::new("body");

    let view = |b: &mut TreeBuilder, m: &mut runtime_ui::InteractionMonitor| {
        m.focus("field");
        b.with("input", |b| {
            b.attr("id", "field");
            Ok(())
        })
    };
    let view_no_focus = |b: &mut TreeBuilder, _: &mut runtime_ui::InteractionMonitor| {
        b.with("input", |b| {
            b.attr("id", "field");
            Ok(())
        })
    };

    runtime.render_frame(&mut host, view).unwrap();
    host.set_input_value("field", "selection");
    host.set_selection("field", SelectionRange::new(2, 6));

    runtime.render_frame(&mut host, view_no_focus).unwrap();
    assert_eq!(host.selection("field"), Some(SelectionRange::new(2, 6)));
}

#[test]
fn structural_error_aborts_the_frame_without_touching_the_host() {
    let mut host = MemHost::new("body");
    let mut runtime = UiRuntime::new("body");

    runtime
        .render_frame(&mut host, |b, _| b.text_element("div", "stable"))
        .unwrap();
    let before = host.live_tree();
    let previous_before = runtime.previous_tree().cloned();

    let err = runtime
        .render_frame(&mut host, |b, _| {
            b.begin("div");
            b.end("span")
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::TagMismatch { .. }));

    assert_tree_eq(&before, &host.live_tree());
    assert_eq!(runtime.previous_tree().cloned(), previous_before);

    // The next well-formed frame recovers cleanly.
    runtime
        .render_frame(&mut host, |b, _| b.text_element("div", "recovered"))
        .unwrap();
    let want = expected(|b| b.text_element("div", "recovered"));
    assert_tree_eq(&want, &host.live_tree());
}

#[test]
fn hover_chain_drives_styling_across_frames() {
    let mut host = MemHost::new("body");
    let mut scheduler = MemScheduler::new();
    let mut runtime = UiRuntime::new("body");

    let view = |b: &mut TreeBuilder, m: &mut runtime_ui::InteractionMonitor| {
        let hovered = m.is_hovering("row");
        b.with("li", |b| {
            b.attr("id", "row");
            if hovered {
                b.style("background", "#eee");
            }
            b.with("span", |b| {
                b.attr("id", "label");
                b.text("item");
                Ok(())
            })
        })
    };

    runtime.render_frame(&mut host, view).unwrap();

    let label = host.find_by_id("label").expect("label exists");
    let over = HostEvent::MouseOver {
        ancestor_ids: host.ancestor_ids(label),
    };
    runtime.handle_event(&over, &mut scheduler);
    assert!(scheduler.take_pending());

    runtime.render_frame(&mut host, view).unwrap();
    let want = expected(|b| {
        b.with("li", |b| {
            b.attr("id", "row");
            b.style("background", "#eee");
            b.with("span", |b| {
                b.attr("id", "label");
                b.text("item");
                Ok(())
            })
        })
    });
    assert_tree_eq(&want, &host.live_tree());

    // The same chain again is not a state change, so no new frame.
    runtime.handle_event(&over, &mut scheduler);
    assert!(!scheduler.is_pending());
}

#[test]
fn key_release_reaches_the_registered_element() {
    let mut host = MemHost::new("body");
    let mut scheduler = MemScheduler::new();
    let mut runtime = UiRuntime::new("body");

    const ENTER: u32 = 13;
    let mut submitted = Vec::new();

    let frame = |runtime: &mut UiRuntime, host: &mut MemHost, log: &mut Vec<bool>| {
        let mut hit = false;
        runtime
            .render_frame(host, |b, m| {
                hit = m.was_key_released("new-todo", ENTER);
                b.with("input", |b| {
                    b.attr("id", "new-todo");
                    Ok(())
                })
            })
            .unwrap();
        log.push(hit);
    };

    frame(&mut runtime, &mut host, &mut submitted);

    let input = host.find_by_id("new-todo").expect("input exists");
    let enter_up = HostEvent::KeyUp {
        ancestor_ids: host.ancestor_ids(input),
        code: ENTER,
    };
    runtime.handle_event(&enter_up, &mut scheduler);
    assert!(scheduler.take_pending());

    frame(&mut runtime, &mut host, &mut submitted);
    frame(&mut runtime, &mut host, &mut submitted);
    assert_eq!(submitted, vec![false, true, false]);
}
