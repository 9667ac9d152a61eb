use std::time::Duration;

use anyhow::Result;

use quad_app_core::{
    event_list_vm, AppCommand, AppKernel, AppState, AppStore, EventListVm, NoticeKind,
};
use quad_core::DraftField;
use quad_memstore::{MemoryAuthProvider, MemoryEventStore};

use crate::{wait_for, TracingNavigator};

const SETTLE: Duration = Duration::from_secs(3);

type DemoKernel = AppKernel<MemoryAuthProvider, MemoryEventStore, TracingNavigator>;

fn demo_kernel(auth: MemoryAuthProvider, store: MemoryEventStore) -> DemoKernel {
    AppKernel::new(AppStore::default(), auth, store, TracingNavigator)
}

fn fill_draft(kernel: &mut DemoKernel, fields: [(DraftField, &str); 5]) {
    for (field, value) in fields {
        kernel.dispatch(AppCommand::SetDraftField(field, value.to_string()));
    }
}

fn print_notice(state: &AppState) {
    if let Some(notice) = &state.notice {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        println!("   [{tag}] {}", notice.message);
    }
}

fn print_event_list(vm: &EventListVm) {
    if vm.is_loading {
        println!(":: Loading events...");
        return;
    }
    if vm.is_empty {
        println!(":: No events yet.");
        return;
    }
    println!(":: Available events:");
    for card in &vm.cards {
        let badge = if card.is_creator { "  [Your Event]" } else { "" };
        println!(
            "   {} — {} @ {} ({}){badge}",
            card.title, card.date, card.time, card.location
        );
        println!(
            "     Host: {}  Participants: {}  Next action: {}",
            card.host_email, card.participant_count, card.action_label
        );
    }
}

/// Scripted two-user walkthrough: create, join, leave, sign out. Each user
/// runs their own kernel and session against one shared collection.
pub fn cmd_demo() -> Result<()> {
    println!(":: Campus events walkthrough (in-memory)");

    let store = MemoryEventStore::new();
    let alice_auth = MemoryAuthProvider::new();
    let bob_auth = MemoryAuthProvider::new();

    let mut alice = demo_kernel(alice_auth.clone(), store.clone());
    let mut bob = demo_kernel(bob_auth.clone(), store.clone());
    alice.activate();
    bob.activate();

    alice_auth.sign_in("alice", "alice@campus.edu");
    bob_auth.sign_in("bob", "bob@campus.edu");
    wait_for(&mut alice, SETTLE, |s| {
        s.session.is_signed_in() && !s.feed.loading
    })?;
    wait_for(&mut bob, SETTLE, |s| {
        s.session.is_signed_in() && !s.feed.loading
    })?;

    println!(":: alice creates an event");
    alice.dispatch(AppCommand::ToggleForm);
    fill_draft(
        &mut alice,
        [
            (DraftField::Title, "Study Group Meetup"),
            (DraftField::Description, "Weekly algorithms review"),
            (DraftField::Date, "March 15"),
            (DraftField::Time, "3:00 PM"),
            (DraftField::Location, "Library Room 201"),
        ],
    );
    alice.dispatch(AppCommand::SubmitEvent);
    let state = wait_for(&mut alice, SETTLE, |s| {
        !s.form.in_flight() && s.notice.is_some()
    })?;
    print_notice(&state);
    alice.dispatch(AppCommand::DismissNotice);

    let state = wait_for(&mut bob, SETTLE, |s| !s.feed.events.is_empty())?;
    print_event_list(&event_list_vm(&state));
    let event_id = state.feed.events[0].id.clone();

    println!(":: bob joins");
    bob.dispatch(AppCommand::ToggleParticipation(event_id.clone()));
    let state = wait_for(&mut bob, SETTLE, |s| {
        s.feed
            .events
            .first()
            .map_or(false, |e| e.participants.len() == 2)
    })?;
    print_notice(&state);
    print_event_list(&event_list_vm(&state));

    println!(":: bob leaves again");
    bob.dispatch(AppCommand::ToggleParticipation(event_id));
    let state = wait_for(&mut bob, SETTLE, |s| {
        s.feed
            .events
            .first()
            .map_or(false, |e| e.participants.len() == 1)
    })?;
    print_notice(&state);
    print_event_list(&event_list_vm(&state));

    println!(":: alice signs out");
    alice.dispatch(AppCommand::SignOut);
    let state = wait_for(&mut alice, SETTLE, |s| !s.session.is_signed_in())?;
    println!(
        "   local events after sign-out: {}",
        state.feed.events.len()
    );

    Ok(())
}

/// Signs in, creates one event, prints the resulting list. Fails with a
/// non-zero exit on validation or store errors.
pub fn cmd_create(
    title: String,
    description: String,
    date: String,
    time: String,
    location: String,
    user: String,
    email: String,
) -> Result<()> {
    let store = MemoryEventStore::new();
    let auth = MemoryAuthProvider::new();
    let mut kernel = demo_kernel(auth.clone(), store);
    kernel.activate();
    auth.sign_in(user, email);
    wait_for(&mut kernel, SETTLE, |s| {
        s.session.is_signed_in() && !s.feed.loading
    })?;

    kernel.dispatch(AppCommand::ToggleForm);
    for (field, value) in [
        (DraftField::Title, title),
        (DraftField::Description, description),
        (DraftField::Date, date),
        (DraftField::Time, time),
        (DraftField::Location, location),
    ] {
        kernel.dispatch(AppCommand::SetDraftField(field, value));
    }
    kernel.dispatch(AppCommand::SubmitEvent);

    let state = wait_for(&mut kernel, SETTLE, |s| {
        !s.form.in_flight() && s.notice.is_some()
    })?;
    print_notice(&state);
    if let Some(notice) = &state.notice {
        if notice.kind == NoticeKind::Error {
            anyhow::bail!("{}", notice.message);
        }
    }

    let state = wait_for(&mut kernel, SETTLE, |s| !s.feed.events.is_empty())?;
    print_event_list(&event_list_vm(&state));
    Ok(())
}
