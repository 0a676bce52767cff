use crate::endpoints::{
    appointments::{
        AppointmentUpdate, CreateAppointment, DeleteAppointment, GetAppointment,
        ListAppointments, NewAppointment, UpdateAppointment,
    },
    auth::{GetProfile, Login, RefreshToken, Register},
    clients::{
        CreateClient, Customer, DeleteClient, GetClient, ListClientAppointments, ListClientPhotos,
        ListClients, UpdateClient,
    },
    dashboard::{GetDashboard, GetStats},
    expenses::{
        CreateExpense, DeleteExpense, DeleteExpensePhoto, Expense, GetExpense, ListExpenses,
        UpdateExpense, UploadExpensePhoto,
    },
    photos::{DeletePhoto, ListAppointmentPhotos, Photo, PhotoKind, UploadPhoto},
    promotions::{
        CreatePromotion, DeletePromotion, ListPromotions, PromotionDraft, UpdatePromotion,
    },
    services::{CreateService, DeleteService, ListServices, Service, UpdateService},
    system::InvalidateCache,
};
use crate::{ApiError, Client};
use reqwest::Url;
use secrecy::SecretString;
use uuid::Uuid;

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn login(&self, email: impl Into<String>, password: SecretString) -> Login {
        Login::new(email, password)
    }

    pub fn register(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Register {
        Register::new(first_name, last_name, email, password)
    }

    pub fn refresh(&self, refresh_token: impl Into<String>) -> RefreshToken {
        RefreshToken::new(refresh_token)
    }

    pub fn profile(&self) -> GetProfile {
        GetProfile
    }
}

pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListClients {
        ListClients
    }

    pub fn get(&self, id: Uuid) -> GetClient {
        GetClient::new(id)
    }

    pub fn create(&self, client: Customer) -> CreateClient {
        CreateClient::new(client)
    }

    pub fn update(&self, id: Uuid, client: Customer) -> UpdateClient {
        UpdateClient::new(id, client)
    }

    pub fn delete(&self, id: Uuid) -> DeleteClient {
        DeleteClient::new(id)
    }

    pub fn appointments(&self, id: Uuid) -> ListClientAppointments {
        ListClientAppointments::new(id)
    }

    pub fn photos(&self, id: Uuid) -> ListClientPhotos {
        ListClientPhotos::new(id)
    }
}

pub struct ServiceRepository;

impl ServiceRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListServices {
        ListServices
    }

    pub fn create(&self, service: Service) -> CreateService {
        CreateService::new(service)
    }

    pub fn update(&self, id: Uuid, service: Service) -> UpdateService {
        UpdateService::new(id, service)
    }

    pub fn delete(&self, id: Uuid) -> DeleteService {
        DeleteService::new(id)
    }
}

pub struct AppointmentRepository;

impl AppointmentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListAppointments {
        ListAppointments::new()
    }

    pub fn get(&self, id: Uuid) -> GetAppointment {
        GetAppointment::new(id)
    }

    pub fn create(&self, appointment: NewAppointment) -> CreateAppointment {
        CreateAppointment::new(appointment)
    }

    pub fn update(&self, id: Uuid, appointment: AppointmentUpdate) -> UpdateAppointment {
        UpdateAppointment::new(id, appointment)
    }

    pub fn delete(&self, id: Uuid) -> DeleteAppointment {
        DeleteAppointment::new(id)
    }

    pub fn photos(&self, id: Uuid) -> ListAppointmentPhotos {
        ListAppointmentPhotos::new(id)
    }

    pub fn upload_photo(&self, id: Uuid, image: Vec<u8>, kind: PhotoKind) -> UploadPhoto {
        UploadPhoto::new(id, kind, image)
    }
}

pub struct ExpenseRepository;

impl ExpenseRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListExpenses {
        ListExpenses::new()
    }

    pub fn get(&self, id: Uuid) -> GetExpense {
        GetExpense::new(id)
    }

    pub fn create(&self, expense: Expense) -> CreateExpense {
        CreateExpense::new(expense)
    }

    pub fn update(&self, id: Uuid, expense: Expense) -> UpdateExpense {
        UpdateExpense::new(id, expense)
    }

    pub fn delete(&self, id: Uuid) -> DeleteExpense {
        DeleteExpense::new(id)
    }

    pub fn upload_photo(&self, id: Uuid, image: Vec<u8>) -> UploadExpensePhoto {
        UploadExpensePhoto::new(id, image)
    }

    pub fn delete_photo(&self, photo_id: Uuid) -> DeleteExpensePhoto {
        DeleteExpensePhoto::new(photo_id)
    }
}

pub struct PromotionRepository;

impl PromotionRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListPromotions {
        ListPromotions::new()
    }

    pub fn active(&self) -> ListPromotions {
        ListPromotions::new().active_only(true)
    }

    pub fn create(&self, promotion: PromotionDraft) -> CreatePromotion {
        CreatePromotion::new(promotion)
    }

    pub fn update(&self, id: Uuid, promotion: PromotionDraft) -> UpdatePromotion {
        UpdatePromotion::new(id, promotion)
    }

    pub fn delete(&self, id: Uuid) -> DeletePromotion {
        DeletePromotion::new(id)
    }
}

pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn summary(&self) -> GetDashboard {
        GetDashboard
    }

    pub fn stats(&self) -> GetStats {
        GetStats
    }
}

pub struct PhotoRepository;

impl PhotoRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn delete(&self, id: Uuid) -> DeletePhoto {
        DeletePhoto::new(id)
    }

    /// Image URLs need the bearer token too; fetch them through an
    /// authenticated transport.
    pub fn thumbnail_url(&self, client: &Client, photo: &Photo) -> Result<Url, ApiError> {
        client.url(&photo.thumbnail_path())
    }

    pub fn original_url(&self, client: &Client, photo: &Photo) -> Result<Url, ApiError> {
        client.url(&photo.original_path())
    }
}

pub struct SystemRepository;

impl SystemRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn invalidate_cache(&self) -> InvalidateCache {
        InvalidateCache
    }
}
