mod common;

use common::{seed_medicine, spawn_app, update_from};
use rust_decimal::Decimal;
use shared::{
    domain::requests::FindAllMedicines,
    errors::ServiceError,
    model::{DEFAULT_MEDICINE_IMAGE, MedicineCategory},
};

fn query(category: Option<&str>, search: Option<&str>) -> FindAllMedicines {
    FindAllMedicines {
        category: category.map(str::to_owned),
        search: search.map(str::to_owned),
    }
}

#[tokio::test]
async fn catalog_filters_by_category_and_search() {
    let app = spawn_app().await;

    seed_medicine(&app, common::medicine("Paracetamol", 5, 10)).await;
    let mut amoxicillin = common::medicine("Amoxicillin", 12, 4);
    amoxicillin.category = MedicineCategory::Prescription;
    amoxicillin.description = "Antibiotic for bacterial infections".into();
    amoxicillin.requires_prescription = true;
    seed_medicine(&app, amoxicillin).await;
    seed_medicine(&app, common::medicine("Cold Relief", 7, 20)).await;

    let catalog = &app.state.di_container.medicine_service.query;

    let all = catalog.find_all(&query(None, None)).await.unwrap();
    assert_eq!(all.data.len(), 3);
    assert_eq!(all.message, "Found 3 medicines");

    let everything = catalog.find_all(&query(Some("all"), None)).await.unwrap();
    assert_eq!(everything.data.len(), 3);

    let otc = catalog.find_all(&query(Some("OTC"), None)).await.unwrap();
    assert_eq!(otc.data.len(), 2);
    assert!(otc.data.iter().all(|m| m.category == MedicineCategory::Otc));

    let by_name = catalog.find_all(&query(None, Some("PARA"))).await.unwrap();
    assert_eq!(by_name.data.len(), 1);
    assert_eq!(by_name.data[0].name, "Paracetamol");

    let by_description = catalog
        .find_all(&query(None, Some("bacterial")))
        .await
        .unwrap();
    assert_eq!(by_description.data.len(), 1);
    assert_eq!(by_description.data[0].name, "Amoxicillin");

    let combined = catalog
        .find_all(&query(Some("Prescription"), Some("cold")))
        .await
        .unwrap();
    assert!(combined.data.is_empty());

    let wildcard = catalog.find_all(&query(None, Some("%"))).await.unwrap();
    assert!(wildcard.data.is_empty());
}

#[tokio::test]
async fn unknown_category_is_a_validation_error() {
    let app = spawn_app().await;

    let err = app
        .state
        .di_container
        .medicine_service
        .query
        .find_all(&query(Some("Herbal"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn medicines_can_be_created_updated_and_removed() {
    let app = spawn_app().await;
    let service = &app.state.di_container.medicine_service;

    let req = common::medicine("Paracetamol", 5, 10);
    let created = service.command.create_medicine(&req).await.unwrap();
    assert_eq!(created.message, "Medicine created successfully");
    assert_eq!(created.data.image, DEFAULT_MEDICINE_IMAGE);

    let id = created.data.id;
    let mut update = update_from(&req, id);
    update.stock = 25;
    update.price = Decimal::new(675, 2);
    update.image = Some("/images/paracetamol.png".into());

    let updated = service.command.update_medicine(&update).await.unwrap().data;
    assert_eq!(updated.stock, 25);
    assert_eq!(updated.price, Decimal::new(675, 2));
    assert_eq!(updated.image, "/images/paracetamol.png");

    let fetched = service.query.find_by_id(id).await.unwrap().data;
    assert_eq!(fetched.stock, 25);

    let removed = service.command.delete_medicine(id).await.unwrap();
    assert_eq!(removed.message, "Medicine removed");

    let err = service.query.find_by_id(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = service.command.delete_medicine(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = service.command.update_medicine(&update).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_without_an_id_is_rejected() {
    let app = spawn_app().await;
    let req = common::medicine("Paracetamol", 5, 10);
    let mut update = update_from(&req, 1);
    update.id = None;

    let err = app
        .state
        .di_container
        .medicine_service
        .command
        .update_medicine(&update)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}
