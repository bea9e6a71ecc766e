mod common;

use common::{register_user, spawn_app};
use shared::{domain::requests::UploadPrescriptionRequest, errors::ServiceError};

fn upload(user_id: i32, name: &str, bytes: &[u8]) -> UploadPrescriptionRequest {
    UploadPrescriptionRequest {
        user_id,
        original_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

#[tokio::test]
async fn uploads_are_stored_listed_and_removed() {
    let app = spawn_app().await;
    let user = register_user(&app, "patient@pharmacy.test").await;
    let service = &app.state.di_container.prescription_service;

    let stored = service
        .upload(upload(user, "scan 01.pdf", b"%PDF-1.4 fake"))
        .await
        .unwrap();
    assert_eq!(stored.message, "Prescription uploaded successfully");

    let prescription = stored.data;
    assert_eq!(prescription.name, "scan 01.pdf");
    assert!(prescription.url.starts_with("/uploads/prescriptions/"));
    assert!(prescription.url.ends_with("-scan_01.pdf"));

    let file_name = prescription
        .url
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();
    let on_disk = app.uploads.path().join("prescriptions").join(&file_name);
    assert_eq!(std::fs::read(&on_disk).unwrap(), b"%PDF-1.4 fake");

    let listed = service.find_by_user(user).await.unwrap().data;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, prescription.id);

    service.delete(user, prescription.id).await.unwrap();
    assert!(service.find_by_user(user).await.unwrap().data.is_empty());
    assert!(!on_disk.exists());
}

#[tokio::test]
async fn unsupported_or_empty_files_are_rejected() {
    let app = spawn_app().await;
    let user = register_user(&app, "patient@pharmacy.test").await;
    let service = &app.state.di_container.prescription_service;

    let err = service
        .upload(upload(user, "notes.txt", b"hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Upload(_)));

    let err = service
        .upload(upload(user, "scan.png", b""))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Upload(msg) if msg == "Please upload a file"));

    let too_big = vec![0u8; app.state.max_upload_bytes + 1];
    let err = service
        .upload(upload(user, "scan.jpg", &too_big))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Upload(_)));

    assert!(service.find_by_user(user).await.unwrap().data.is_empty());
}

#[tokio::test]
async fn prescriptions_are_private_to_their_owner() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice@pharmacy.test").await;
    let bob = register_user(&app, "bob@pharmacy.test").await;
    let service = &app.state.di_container.prescription_service;

    let mine = service
        .upload(upload(alice, "rx.jpeg", b"\xff\xd8\xff"))
        .await
        .unwrap()
        .data;

    assert!(service.find_by_user(bob).await.unwrap().data.is_empty());

    let err = service.delete(bob, mine.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(service.find_by_user(alice).await.unwrap().data.len(), 1);

    let err = service.delete(alice, mine.id + 100).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
