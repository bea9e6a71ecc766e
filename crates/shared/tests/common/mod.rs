#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    abstract_trait::DynHashing,
    config::{Config, Hashing},
    domain::requests::{
        CreateMedicineRequest, CreateOrderRequest, OrderItemRequest, RegisterRequest,
        UpdateMedicineRequest,
    },
    model::{Address, MedicineCategory},
    state::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub state: AppState,
    pub uploads: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = Config::in_memory("test-secret", uploads.path());
    let hashing = Arc::new(Hashing::with_cost(4)) as DynHashing;

    let state = AppState::with_hashing(&config, hashing).await.unwrap();

    TestApp { state, uploads }
}

pub fn medicine(name: &str, price: i64, stock: i32) -> CreateMedicineRequest {
    CreateMedicineRequest {
        name: name.to_string(),
        description: format!("{name} tablets"),
        price: Decimal::new(price, 0),
        category: MedicineCategory::Otc,
        dosage: "500mg".into(),
        manufacturer: "Acme Pharma".into(),
        expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        stock,
        image: None,
        requires_prescription: false,
    }
}

pub fn update_from(req: &CreateMedicineRequest, id: i32) -> UpdateMedicineRequest {
    UpdateMedicineRequest {
        id: Some(id),
        name: req.name.clone(),
        description: req.description.clone(),
        price: req.price,
        category: req.category,
        dosage: req.dosage.clone(),
        manufacturer: req.manufacturer.clone(),
        expiry_date: req.expiry_date,
        stock: req.stock,
        image: req.image.clone(),
        requires_prescription: req.requires_prescription,
    }
}

pub async fn seed_medicine(app: &TestApp, req: CreateMedicineRequest) -> i32 {
    app.state
        .di_container
        .medicine_service
        .command
        .create_medicine(&req)
        .await
        .unwrap()
        .data
        .id
}

pub async fn stock_of(app: &TestApp, id: i32) -> i32 {
    app.state
        .di_container
        .medicine_service
        .query
        .find_by_id(id)
        .await
        .unwrap()
        .data
        .stock
}

pub fn register_request(name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
        phone: None,
        address: Address::default(),
    }
}

pub async fn register_user(app: &TestApp, email: &str) -> i32 {
    app.state
        .di_container
        .auth_service
        .register
        .register(&register_request("Test User", email))
        .await
        .unwrap()
        .data
        .user
        .id
}

pub fn order_of(lines: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: lines
            .iter()
            .map(|&(medicine, quantity)| OrderItemRequest { medicine, quantity })
            .collect(),
        delivery_details: Default::default(),
        payment_details: Default::default(),
    }
}
