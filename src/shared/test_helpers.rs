//! In-memory stand-ins for the database, auth provider and object storage.
//!
//! One `InMemoryBackend` implements every collaborator trait over a single
//! shared state, so a test can seed data through the backend and then drive
//! any service built from it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::Name;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::JwtValidator;
use crate::features::auth::model::{ProviderSession, ProviderUser};
use crate::features::auth::provider::AuthProvider;
use crate::features::auth::services::{AdminGate, AuthService};
use crate::features::auth::session::SessionContext;
use crate::features::catalog::models::{
    CatalogItemChanges, Category, NewCategory, NewService, Service,
};
use crate::features::catalog::repositories::CatalogRepository;
use crate::features::dashboard::repositories::{
    RegistrationHistoryRow, StatsRepository, TopServiceRow,
};
use crate::features::map::models::MapProvider;
use crate::features::map::repositories::MapRepository;
use crate::features::users::models::{Profile, UserRole, VerificationStatus};
use crate::features::users::repositories::ProfileRepository;
use crate::features::verification::models::document::DocumentOwner;
use crate::features::verification::models::{DecisionStatus, VerificationDocument};
use crate::features::verification::repositories::DocumentRepository;
use crate::modules::storage::{object_key, SignedUrlIssuer};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-enough-entropy";
pub const TEST_AUDIENCE: &str = "authenticated";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

const TOKEN_TTL_SECS: i64 = 3600;

/// Access token signed the way the provider signs them
pub fn issue_token(user_id: Uuid) -> String {
    issue_token_with(user_id, TEST_JWT_SECRET, TEST_AUDIENCE, TOKEN_TTL_SECS)
}

pub fn issue_token_with(user_id: Uuid, secret: &str, audience: &str, exp_offset_secs: i64) -> String {
    let claims = json!({
        "sub": user_id,
        "aud": audience,
        "exp": Utc::now().timestamp() + exp_offset_secs,
        "session_id": Uuid::new_v4().to_string(),
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encodes")
}

pub fn fake_profile(role: UserRole) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: Some(Username().fake()),
        full_name: Some(Name().fake()),
        email: Some(SafeEmail().fake()),
        user_role: role,
        cpf_cnpj: None,
        is_admin: false,
        verification_status: VerificationStatus::Pending,
        avatar_url: None,
        created_at: Utc::now(),
        latitude: Some((-30.0..-5.0).fake::<f64>()),
        longitude: Some((-60.0..-35.0).fake::<f64>()),
    }
}

pub fn fake_document(profile_id: Uuid) -> VerificationDocument {
    VerificationDocument {
        id: Uuid::new_v4(),
        profile_id,
        document_type: Some("rg".to_string()),
        doc_front_url: Some(format!("{}/front.jpg", profile_id)),
        doc_back_url: Some(format!("{}/back.jpg", profile_id)),
        selfie_url: Some(format!("{}/selfie.jpg", profile_id)),
        holding_doc_url: Some(format!("{}/holding.jpg", profile_id)),
        status: VerificationStatus::Pending,
        created_at: Utc::now(),
        owner: DocumentOwner {
            full_name: Some(Name().fake()),
            cpf_cnpj: Some("123.456.789-00".to_string()),
            username: Some(Username().fake()),
        },
    }
}

struct Account {
    user_id: Uuid,
    email: String,
    password: String,
}

struct State {
    clock: DateTime<Utc>,
    profiles: Vec<Profile>,
    categories: Vec<Category>,
    services: Vec<Service>,
    documents: Vec<VerificationDocument>,
    accounts: Vec<Account>,
    live_tokens: HashMap<String, Uuid>,
    refresh_tokens: HashMap<String, Uuid>,
    recovery_codes: HashMap<String, String>,
    signed_out: HashSet<String>,
    unsignable_paths: HashSet<String>,
    history_bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl State {
    /// Strictly increasing timestamps so "newest first" is deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += chrono::Duration::seconds(1);
        self.clock
    }

    fn issue_session(&mut self, user_id: Uuid, email: Option<String>) -> ProviderSession {
        let access_token = issue_token(user_id);
        let refresh_token = Uuid::new_v4().to_string();
        self.live_tokens.insert(access_token.clone(), user_id);
        self.refresh_tokens.insert(refresh_token.clone(), user_id);

        ProviderSession {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: TOKEN_TTL_SECS,
            refresh_token: Some(refresh_token),
            user: ProviderUser { id: user_id, email },
        }
    }

    fn email_of(&self, user_id: Uuid) -> Option<String> {
        self.accounts
            .iter()
            .find(|a| a.user_id == user_id)
            .map(|a| a.email.clone())
    }
}

struct Inner {
    state: Mutex<State>,
    sessions: Mutex<Arc<SessionContext>>,
    store_calls: AtomicUsize,
    get_user_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_profile_updates: AtomicBool,
}

impl Inner {
    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("state lock")
    }

    fn record_call(&self) {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Counts a read and fails it when read failures are switched on
    fn read(&self) -> Result<()> {
        self.record_call();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryBackend {
    inner: Arc<Inner>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    clock: Utc::now() - chrono::Duration::days(1),
                    profiles: Vec::new(),
                    categories: Vec::new(),
                    services: Vec::new(),
                    documents: Vec::new(),
                    accounts: Vec::new(),
                    live_tokens: HashMap::new(),
                    refresh_tokens: HashMap::new(),
                    recovery_codes: HashMap::new(),
                    signed_out: HashSet::new(),
                    unsignable_paths: HashSet::new(),
                    history_bounds: None,
                }),
                sessions: Mutex::new(Arc::new(SessionContext::new(Duration::from_secs(60)))),
                store_calls: AtomicUsize::new(0),
                get_user_calls: AtomicUsize::new(0),
                fail_reads: AtomicBool::new(false),
                fail_profile_updates: AtomicBool::new(false),
            }),
        }
    }

    // Seeding

    pub fn add_profile(&self, role: UserRole) -> Profile {
        let mut state = self.inner.state();
        let mut profile = fake_profile(role);
        profile.created_at = state.tick();
        state.profiles.push(profile.clone());
        profile
    }

    /// Administrator profile with a provider account using `TEST_PASSWORD`
    pub fn add_admin(&self, email: &str) -> Profile {
        let mut state = self.inner.state();
        let mut profile = fake_profile(UserRole::Client);
        profile.is_admin = true;
        profile.email = Some(email.to_string());
        profile.created_at = state.tick();
        state.profiles.push(profile.clone());
        state.accounts.push(Account {
            user_id: profile.id,
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
        });
        profile
    }

    pub fn replace_profile(&self, profile: Profile) {
        let mut state = self.inner.state();
        if let Some(existing) = state.profiles.iter_mut().find(|p| p.id == profile.id) {
            *existing = profile;
        }
    }

    pub fn set_admin(&self, id: Uuid, is_admin: bool) {
        let mut state = self.inner.state();
        if let Some(profile) = state.profiles.iter_mut().find(|p| p.id == id) {
            profile.is_admin = is_admin;
        }
    }

    pub fn profile(&self, id: Uuid) -> Option<Profile> {
        self.inner.state().profiles.iter().find(|p| p.id == id).cloned()
    }

    /// Pending document owned by `profile_id`, with the owner's display fields
    pub fn add_document(&self, profile_id: Uuid) -> VerificationDocument {
        let mut state = self.inner.state();
        let mut document = fake_document(profile_id);
        document.created_at = state.tick();
        if let Some(owner) = state.profiles.iter().find(|p| p.id == profile_id) {
            document.owner = DocumentOwner {
                full_name: owner.full_name.clone(),
                cpf_cnpj: owner.cpf_cnpj.clone(),
                username: owner.username.clone(),
            };
        }
        state.documents.push(document.clone());
        document
    }

    pub fn replace_document(&self, document: VerificationDocument) {
        let mut state = self.inner.state();
        if let Some(existing) = state.documents.iter_mut().find(|d| d.id == document.id) {
            *existing = document;
        }
    }

    pub fn document(&self, id: Uuid) -> Option<VerificationDocument> {
        self.inner.state().documents.iter().find(|d| d.id == id).cloned()
    }

    /// Live provider session for `user_id`, as if the user had signed in
    pub fn start_session(&self, user_id: Uuid) -> String {
        let token = issue_token(user_id);
        self.inner.state().live_tokens.insert(token.clone(), user_id);
        token
    }

    pub fn provider_session(&self, token: &str, user_id: Uuid) -> ProviderSession {
        ProviderSession {
            access_token: token.to_string(),
            token_type: "bearer".to_string(),
            expires_in: TOKEN_TTL_SECS,
            refresh_token: None,
            user: ProviderUser {
                id: user_id,
                email: None,
            },
        }
    }

    // Failure injection

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make the profile half of a verification decision fail
    pub fn fail_profile_updates(&self, fail: bool) {
        self.inner.fail_profile_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_signing_for(&self, path: String) {
        self.inner.state().unsignable_paths.insert(path);
    }

    // Observations

    pub fn store_calls(&self) -> usize {
        self.inner.store_calls.load(Ordering::SeqCst)
    }

    pub fn get_user_calls(&self) -> usize {
        self.inner.get_user_calls.load(Ordering::SeqCst)
    }

    pub fn was_signed_out(&self, token: &str) -> bool {
        self.inner.state().signed_out.contains(token)
    }

    pub fn recovery_code(&self, email: &str) -> Option<String> {
        self.inner.state().recovery_codes.get(email).cloned()
    }

    pub fn last_history_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.inner.state().history_bounds
    }

    // Collaborators

    pub fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.inner.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.inner.clone()
    }

    pub fn stats(&self) -> Arc<dyn StatsRepository> {
        self.inner.clone()
    }

    pub fn map(&self) -> Arc<dyn MapRepository> {
        self.inner.clone()
    }

    pub fn documents(&self) -> Arc<dyn DocumentRepository> {
        self.inner.clone()
    }

    pub fn storage(&self) -> Arc<dyn SignedUrlIssuer> {
        self.inner.clone()
    }

    pub fn provider(&self) -> Arc<dyn AuthProvider> {
        self.inner.clone()
    }

    pub fn sessions(&self) -> Arc<SessionContext> {
        self.inner.sessions.lock().expect("sessions lock").clone()
    }

    pub fn gate(&self) -> AdminGate {
        let validator = JwtValidator::new(
            TEST_JWT_SECRET,
            TEST_AUDIENCE.to_string(),
            Duration::from_secs(0),
        );
        AdminGate::new(
            Arc::new(validator),
            self.provider(),
            self.profiles(),
            self.sessions(),
        )
    }

    /// Gate over a fresh session context with the given recheck interval
    pub fn gate_with_recheck(&self, recheck_after: Duration) -> AdminGate {
        *self.inner.sessions.lock().expect("sessions lock") =
            Arc::new(SessionContext::new(recheck_after));
        self.gate()
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.provider(), Arc::new(self.gate()))
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for Inner {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        self.read()?;
        Ok(self.state().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_recent(&self, role: Option<UserRole>, limit: i64) -> Result<Vec<Profile>> {
        self.read()?;
        let mut profiles: Vec<Profile> = self
            .state()
            .profiles
            .iter()
            .filter(|p| role.is_none_or(|r| p.user_role == r))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        profiles.truncate(limit.max(0) as usize);
        Ok(profiles)
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64> {
        self.read()?;
        Ok(self
            .state()
            .profiles
            .iter()
            .filter(|p| p.user_role == role)
            .count() as i64)
    }
}

#[async_trait]
impl CatalogRepository for Inner {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.read()?;
        let mut categories = self.state().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        self.read()?;
        Ok(self.state().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, new: &NewCategory) -> Result<Category> {
        self.record_call();
        let category = Category {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            description: new.description.clone(),
        };
        self.state().categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Category>> {
        self.record_call();
        let mut state = self.state();
        Ok(state.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = changes.name.clone();
            c.description = changes.description.clone();
            c.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        self.record_call();
        let mut state = self.state();
        if state.services.iter().any(|s| s.category_id == id) {
            return Err(AppError::Conflict(
                "Category still has services and cannot be deleted".to_string(),
            ));
        }
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() < before)
    }

    async fn list_services(&self, category_id: Uuid) -> Result<Vec<Service>> {
        self.read()?;
        let mut services: Vec<Service> = self
            .state()
            .services
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn insert_service(&self, new: &NewService) -> Result<Service> {
        self.record_call();
        let mut state = self.state();
        if !state.categories.iter().any(|c| c.id == new.category_id) {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                new.category_id
            )));
        }
        let service = Service {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            description: new.description.clone(),
            category_id: new.category_id,
        };
        state.services.push(service.clone());
        Ok(service)
    }

    async fn update_service(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Service>> {
        self.record_call();
        let mut state = self.state();
        Ok(state.services.iter_mut().find(|s| s.id == id).map(|s| {
            s.name = changes.name.clone();
            s.description = changes.description.clone();
            s.clone()
        }))
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool> {
        self.record_call();
        let mut state = self.state();
        let before = state.services.len();
        state.services.retain(|s| s.id != id);
        Ok(state.services.len() < before)
    }

    async fn count_categories(&self) -> Result<i64> {
        self.read()?;
        Ok(self.state().categories.len() as i64)
    }

    async fn count_services(&self) -> Result<i64> {
        self.read()?;
        Ok(self.state().services.len() as i64)
    }
}

#[async_trait]
impl StatsRepository for Inner {
    async fn registration_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RegistrationHistoryRow>> {
        self.read()?;
        let mut state = self.state();
        state.history_bounds = Some((start, end));

        let mut days: Vec<RegistrationHistoryRow> = Vec::new();
        for profile in state
            .profiles
            .iter()
            .filter(|p| p.created_at >= start && p.created_at <= end)
        {
            let day = profile.created_at.date_naive();
            let idx = match days.iter().position(|r| r.registration_date == day) {
                Some(idx) => idx,
                None => {
                    days.push(RegistrationHistoryRow {
                        registration_date: day,
                        provider_count: 0,
                        client_count: 0,
                    });
                    days.len() - 1
                }
            };
            match profile.user_role {
                UserRole::Provider => days[idx].provider_count += 1,
                UserRole::Client => days[idx].client_count += 1,
            }
        }
        days.sort_by_key(|r| r.registration_date);
        Ok(days)
    }

    async fn top_services(&self) -> Result<Vec<TopServiceRow>> {
        self.read()?;
        Ok(Vec::new())
    }
}

#[async_trait]
impl MapRepository for Inner {
    async fn list_providers(&self) -> Result<Vec<MapProvider>> {
        self.read()?;
        Ok(self
            .state()
            .profiles
            .iter()
            .filter(|p| p.user_role == UserRole::Provider)
            .filter_map(|p| {
                let (lat, lng) = p.coordinates()?;
                Some(MapProvider {
                    id: p.id,
                    full_name: p.full_name.clone(),
                    username: p.username.clone(),
                    avatar_url: p.avatar_url.clone(),
                    lat,
                    lng,
                })
            })
            .collect())
    }
}

#[async_trait]
impl DocumentRepository for Inner {
    async fn list_pending(&self) -> Result<Vec<VerificationDocument>> {
        self.read()?;
        let mut documents: Vec<VerificationDocument> = self
            .state()
            .documents
            .iter()
            .filter(|d| d.status == VerificationStatus::Pending)
            .cloned()
            .collect();
        documents.sort_by_key(|d| d.created_at);
        Ok(documents)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationDocument>> {
        self.read()?;
        Ok(self.state().documents.iter().find(|d| d.id == id).cloned())
    }

    async fn apply_decision(
        &self,
        document_id: Uuid,
        profile_id: Uuid,
        decision: DecisionStatus,
    ) -> Result<()> {
        self.record_call();
        let mut state = self.state();
        let status = decision.verification_status();

        // Resolve both rows before writing either, like a rolled back transaction
        let doc_idx = state
            .documents
            .iter()
            .position(|d| d.id == document_id && d.profile_id == profile_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Document {} not found for profile {}",
                    document_id, profile_id
                ))
            })?;
        let profile_idx = state
            .profiles
            .iter()
            .position(|p| p.id == profile_id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", profile_id)))?;

        if self.fail_profile_updates.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        state.documents[doc_idx].status = status;
        state.profiles[profile_idx].verification_status = status;
        Ok(())
    }
}

#[async_trait]
impl SignedUrlIssuer for Inner {
    async fn create_signed_url(&self, bucket: &str, path: &str, ttl_secs: u32) -> Result<String> {
        if self.state().unsignable_paths.contains(path) {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to generate signed URL for '{}/{}'",
                bucket, path
            )));
        }
        let key = object_key(path)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid object path '{}'", path)))?;
        Ok(format!(
            "https://storage.test/{}/{}?X-Amz-Expires={}",
            bucket, key, ttl_secs
        ))
    }
}

#[async_trait]
impl AuthProvider for Inner {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let mut state = self.state();
        let user_id = state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.user_id)
            .ok_or_else(|| AppError::Auth("Invalid login credentials".to_string()))?;
        Ok(state.issue_session(user_id, Some(email.to_string())))
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state();
        let id = *state
            .live_tokens
            .get(access_token)
            .ok_or_else(|| AppError::Auth("Invalid session".to_string()))?;
        Ok(ProviderUser {
            id,
            email: state.email_of(id),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let mut state = self.state();
        state.live_tokens.remove(access_token);
        state.signed_out.insert(access_token.to_string());
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<ProviderSession> {
        let mut state = self.state();
        let user_id = state
            .refresh_tokens
            .remove(refresh_token)
            .ok_or_else(|| AppError::Auth("Invalid refresh token".to_string()))?;
        let email = state.email_of(user_id);
        Ok(state.issue_session(user_id, email))
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let mut state = self.state();
        if state.accounts.iter().any(|a| a.email == email) {
            let code = (100_000..1_000_000u32).fake::<u32>().to_string();
            state.recovery_codes.insert(email.to_string(), code);
        }
        Ok(())
    }

    async fn verify_recovery_code(&self, email: &str, code: &str) -> Result<ProviderSession> {
        let mut state = self.state();
        if state.recovery_codes.get(email).map(String::as_str) != Some(code) {
            return Err(AppError::Auth("Token has expired or is invalid".to_string()));
        }
        state.recovery_codes.remove(email);
        let user_id = state
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.user_id)
            .ok_or_else(|| AppError::Auth("User not found".to_string()))?;
        Ok(state.issue_session(user_id, Some(email.to_string())))
    }

    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()> {
        let mut state = self.state();
        let user_id = *state
            .live_tokens
            .get(access_token)
            .ok_or_else(|| AppError::Auth("Invalid session".to_string()))?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.user_id == user_id)
            .ok_or_else(|| AppError::Auth("User not found".to_string()))?;
        account.password = new_password.to_string();
        Ok(())
    }
}
