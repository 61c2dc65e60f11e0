mod common;

use common::{eventually, item, items, repository, FakeCatalog};
use pokelist::catalog::CatalogError;
use pokelist::ui::detail::{DetailDialog, DetailDialogState, DetailPresenter};

fn is_ready(dialog: &mut DetailDialog) -> bool {
    dialog.sync();
    matches!(dialog.state(), DetailDialogState::Ready { .. })
}

#[tokio::test]
async fn open_shows_loading_then_detail() {
    let catalog = FakeCatalog::new(items(3));
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.open(item(3));
    assert!(dialog.is_open());
    assert!(matches!(dialog.state(), DetailDialogState::Loading { .. }));

    eventually(|| is_ready(&mut dialog)).await;
    match dialog.state() {
        DetailDialogState::Ready { item: shown, detail } => {
            assert_eq!(shown, &item(3));
            assert_eq!(detail.id, 3);
            assert_eq!(detail.types, vec!["grass".to_string()]);
        }
        other => panic!("Expected Ready, got {other:?}"),
    }
}

#[tokio::test]
async fn failure_then_retry_recovers() {
    let catalog = FakeCatalog::new(items(1));
    catalog.fail_next_detail(CatalogError::Timeout { duration: 10 });
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.open(item(1));
    eventually(|| {
        dialog.sync();
        dialog.state().error_message().is_some()
    })
    .await;
    assert_eq!(dialog.state().error_message(), Some("timeout"));
    assert!(dialog.is_open());

    dialog.retry();
    assert!(matches!(dialog.state(), DetailDialogState::Loading { .. }));
    eventually(|| is_ready(&mut dialog)).await;
    assert_eq!(catalog.detail_calls(), 2);
}

#[tokio::test]
async fn unknown_item_reports_not_found() {
    let catalog = FakeCatalog::new(items(1));
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.open(item(42));
    eventually(|| {
        dialog.sync();
        dialog.state().error_message().is_some()
    })
    .await;

    assert_eq!(dialog.state().error_message(), Some("#42 not found"));
}

#[tokio::test]
async fn close_discards_pending_load() {
    let catalog = FakeCatalog::new(items(1));
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.open(item(1));
    dialog.close();
    assert!(!dialog.is_open());

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    dialog.sync();
    assert_eq!(dialog.state(), &DetailDialogState::Hidden);
}

#[tokio::test]
async fn retry_outside_failure_is_noop() {
    let catalog = FakeCatalog::new(items(1));
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.retry();
    assert_eq!(dialog.state(), &DetailDialogState::Hidden);
    assert_eq!(catalog.detail_calls(), 0);
}

#[tokio::test]
async fn detail_for_a_different_item_fails_instead_of_loading_forever() {
    let catalog = FakeCatalog::new(items(1));
    catalog.shift_detail_ids(1000);
    let mut dialog = DetailDialog::new(repository(&catalog));

    dialog.open(item(1));
    eventually(|| {
        dialog.sync();
        dialog.state().error_message().is_some()
    })
    .await;
    assert_eq!(dialog.state().error_message(), Some("unexpected response"));

    catalog.shift_detail_ids(0);
    dialog.retry();
    eventually(|| is_ready(&mut dialog)).await;
    assert_eq!(catalog.detail_calls(), 2);
}
