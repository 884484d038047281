use signature_recipients::{
    configuration::WizardSettings,
    wizard::{NavigationKey, ReasonOption, RecipientPatch, SignatureSetup, ToastKind},
};

use crate::helpers::spawn_app;

#[tokio::test]
async fn wizard_loads_the_directory_from_the_store() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let mut setup = SignatureSetup::load(&app.store_client(), WizardSettings::default()).await;

    // Assert
    assert_eq!(setup.directory().len(), 3);
    let id = setup.recipients()[0].id();
    let mut row = setup.row(id).unwrap();
    row.type_user_name("ch");
    assert_eq!(row.user_options().len(), 2);
}

#[tokio::test]
async fn wizard_built_from_configuration_applies_the_yaml_settings() {
    // Arrange
    let app = spawn_app().await;
    let client = app.store_client();
    let settings = app.configuration.wizard.clone();
    assert_eq!(settings.custom_reason_max_length, Some(50));
    assert!(settings.confirm_reason_deletion);

    // Act
    let mut setup = SignatureSetup::load(&client, settings).await;

    // Assert
    assert_eq!(setup.directory().len(), 3);
    let id = setup.recipients()[0].id();
    let mut row = setup.row(id).unwrap();
    row.toggle_reason_picker();
    let other = row.reason_options().len() - 1;
    row.select_reason(other);
    row.type_custom_reason(&"x".repeat(80));
    assert_eq!(row.custom_reason().map(|r| r.len()), Some(50));
}

#[tokio::test]
async fn wizard_starts_empty_when_the_store_is_unreachable() {
    let app = spawn_app().await;
    app.overwrite_data_file(b"not json");

    let setup = SignatureSetup::load(&app.store_client(), WizardSettings::default()).await;

    assert!(setup.directory().is_empty());
    assert_eq!(setup.catalog().options(), vec![ReasonOption::Other]);
}

#[tokio::test]
async fn custom_reasons_are_persisted_on_submit_exactly_once() {
    // Arrange
    let app = spawn_app().await;
    let client = app.store_client();
    let mut setup = SignatureSetup::load(&client, WizardSettings::default()).await;
    let first = setup.recipients()[0].id();
    let second = setup.add_recipient();

    {
        let mut row = setup.row(first).unwrap();
        row.type_user_name("John Doe");
        row.user_key(NavigationKey::Enter);
        row.toggle_reason_picker();
        let other = row.reason_options().len() - 1;
        row.select_reason(other);
        row.type_custom_reason("Board Resolution");
        row.custom_reason_key(NavigationKey::Enter).unwrap();
    }
    {
        let mut row = setup.row(second).unwrap();
        row.set_email("jane.doe@example.com");
        row.type_reason_search("board");
        row.reason_key(NavigationKey::Down);
        assert!(row.reason_key(NavigationKey::Enter));
    }

    // Act
    let submission = setup.submit(&client).await.expect("Submission failed.");
    setup.submit(&client).await.expect("Second submission failed.");

    // Assert
    assert_eq!(submission.recipients[0].email, "john.doe@example.com");
    assert_eq!(submission.recipients[1].reason, "Board Resolution");
    assert_eq!(setup.toast().unwrap().kind, ToastKind::Success);
    assert_eq!(app.saved_data().other_reasons, vec!["Audit", "Board Resolution"]);
}

#[tokio::test]
async fn invalid_email_blocks_submission_and_persists_nothing() {
    let app = spawn_app().await;
    let client = app.store_client();
    let mut setup = SignatureSetup::load(&client, WizardSettings::default()).await;
    let id = setup.recipients()[0].id();
    setup.update_recipient(id, RecipientPatch::email("not-an-email"));
    {
        let mut row = setup.row(id).unwrap();
        row.toggle_reason_picker();
        let other = row.reason_options().len() - 1;
        row.select_reason(other);
        row.type_custom_reason("Notary");
        row.click_outside();
    }

    assert!(setup.submit(&client).await.is_err());

    assert_eq!(setup.toast().unwrap().kind, ToastKind::Error);
    assert_eq!(app.saved_data().other_reasons, vec!["Audit"]);
}

#[tokio::test]
async fn deleting_an_other_reason_goes_through_the_store() {
    let app = spawn_app().await;
    let client = app.store_client();
    let mut setup = SignatureSetup::load(&client, WizardSettings::default()).await;

    let deleted = setup
        .delete_other_reason(&client, "Audit")
        .await
        .expect("Deletion failed.");

    assert!(deleted);
    assert!(!setup.catalog().contains("Audit"));
    assert!(app.saved_data().other_reasons.is_empty());
}
