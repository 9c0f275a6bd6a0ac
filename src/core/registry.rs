//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! ReLief 백엔드의 서비스/리포지토리 싱글톤을 관리하는 타입 기반 레지스트리입니다.
//!
//! ## 구성 요소
//!
//! - **ServiceLocator**: `TypeId` → `Arc<dyn Any>` 전역 컨테이너
//! - **인프라 컴포넌트**: `SupabaseClient`, `RedisClient`, `ClerkClient`,
//!   `ResendClient`, `GeminiClient`는 `main`에서 [`ServiceLocator::set`]으로 직접 등록
//! - **리포지토리**: [`register_repository!`](crate::register_repository) 매크로가
//!   `inventory`에 [`RepositoryRegistration`]을 제출
//! - **서비스**: `singleton_macro::service` 매크로가 [`ServiceRegistration`]을 제출
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service]            → ServiceRegistration
//!    ├─ register_repository!  → RepositoryRegistration
//!    └─ inventory::collect!   → 전역 레지스트리
//!
//! 2. 런타임 초기화 (main)
//!    ├─ ServiceLocator::set(Arc<SupabaseClient>) 등 인프라 등록
//!    └─ ServiceLocator::initialize_all() → 리포지토리 → 서비스 순서로 생성
//!
//! 3. 의존성 주입
//!    └─ Arc<T> 필드마다 ServiceLocator::get::<T>()
//! ```
//!
//! ## 이름 규칙
//!
//! `ProfileRepository` 타입은 `"profile_repository"` 등록 이름과,
//! `UserBadgeRepository`는 `"user_badge_repository"`와 매칭됩니다.
//! 비교 시 접미사와 밑줄을 제거하고 소문자로 정규화합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 비즈니스 로직 컴포넌트
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Supabase 테이블 하나를 담당하는 데이터 액세스 컴포넌트
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// PostgREST 테이블 이름 (`/rest/v1/{table}`)
    fn table_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// `constructor`는 `Box<Arc<T>>`를 `Box<dyn Any>`로 반환해야 합니다.
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// `"user_badge_repository"` → `"userbadge"`
fn normalize_registration_name(name: &str) -> String {
    let trimmed = name
        .strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name);

    trimmed.replace('_', "").to_lowercase()
}

/// `"relief_backend::repositories::UserBadgeRepository"` → `("UserBadgeRepository")`
fn extract_clean_type_name(type_name: &str) -> &str {
    match type_name.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

/// 타입 이름에서 레지스트리 조회 키를 만듭니다 (`"UserBadgeRepository"` → `"userbadge"`)
fn lookup_key(clean_type_name: &str, suffix: &str) -> String {
    clean_type_name
        .strip_suffix(suffix)
        .unwrap_or(clean_type_name)
        .to_lowercase()
}

/// 전역 서비스 로케이터
///
/// 모든 인스턴스는 `Arc`로 공유되며 프로세스 수명 동안 유지됩니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn lookup<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(PoisonError::into_inner);

        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 등록된 인스턴스를 반환하거나, 레지스트리에서 찾아 생성합니다.
    ///
    /// 생성자는 락을 잡지 않은 상태에서 호출되므로 생성자 내부에서
    /// 다른 의존성을 `get`으로 요청할 수 있습니다.
    ///
    /// # Panics
    ///
    /// * 순환 참조가 감지된 경우
    /// * 등록되지 않은 타입을 요청한 경우
    ///
    /// 둘 다 시작 시점의 배선 오류이므로 즉시 실패시킵니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = Self::lookup::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                eprintln!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::construct::<T>(type_name);

        LOCATOR.initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&type_id);

        match created {
            Ok(instance) => {
                let mut instances = LOCATOR.instances.write().unwrap_or_else(PoisonError::into_inner);
                let stored = instances
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
                    .clone();

                stored.downcast::<T>().unwrap_or(instance)
            }
            Err(message) => {
                eprintln!("ERROR: Failed to create instance for {}: {}", type_name, message);
                panic!("Failed to create instance for {}: {}", type_name, message);
            }
        }
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Result<Arc<T>, String> {
        let clean_type_name = extract_clean_type_name(type_name);

        let (registration_name, boxed_instance) = if clean_type_name.ends_with("Repository") {
            let key = lookup_key(clean_type_name, "Repository");
            let registration = REPOSITORY_NAME_CACHE
                .get(&key)
                .ok_or_else(|| format!("No repository found for entity: {}", key))?;
            (registration.name, (registration.constructor)())
        } else if clean_type_name.ends_with("Service") {
            let key = lookup_key(clean_type_name, "Service");
            let registration = SERVICE_NAME_CACHE
                .get(&key)
                .ok_or_else(|| format!("No service found for entity: {}", key))?;
            (registration.name, (registration.constructor)())
        } else {
            return Err(format!(
                "{} is not registered. Register infrastructure clients with ServiceLocator::set()",
                clean_type_name
            ));
        };

        boxed_instance
            .downcast::<Arc<T>>()
            .map(|arc_instance| *arc_instance)
            .map_err(|_| format!("Type mismatch for registration: {}", registration_name))
    }

    /// 인프라 컴포넌트를 직접 등록합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(SupabaseClient::new()?));
    /// ServiceLocator::set(Arc::new(GeminiClient::new()?));
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = extract_clean_type_name(std::any::type_name::<T>());

        println!("📦 Registering: {}", clean_name);

        LOCATOR.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록 여부만 확인합니다 (생성하지 않음).
    pub fn contains<T: 'static + Send + Sync>() -> bool {
        Self::lookup::<T>().is_some()
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 인프라 컴포넌트가 모두 `set`된 이후에 호출해야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

/// Supabase 테이블 리포지토리를 선언하고 레지스트리에 등록합니다.
///
/// 모든 필드는 `Arc<T>`로 감싸지며 `ServiceLocator::get::<T>()`로 주입됩니다.
///
/// ```rust,ignore
/// register_repository! {
///     name = "profile", table = "profiles",
///     pub struct ProfileRepository {
///         client: SupabaseClient,
///     }
/// }
///
/// let repo = ProfileRepository::instance();
/// ```
#[macro_export]
macro_rules! register_repository {
    (
        name = $name:literal, table = $table:literal,
        $(#[$meta:meta])*
        $vis:vis struct $repo:ident {
            $($field:ident : $dep:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $repo {
            $($field: ::std::sync::Arc<$dep>,)*
        }

        impl $repo {
            /// 테이블 이름
            pub const TABLE: &'static str = $table;

            /// 싱글톤 인스턴스를 가져옵니다.
            pub fn instance() -> ::std::sync::Arc<Self> {
                static INSTANCE: ::once_cell::sync::OnceCell<::std::sync::Arc<$repo>> =
                    ::once_cell::sync::OnceCell::new();

                INSTANCE
                    .get_or_init(|| {
                        ::std::sync::Arc::new(Self {
                            $($field: $crate::core::registry::ServiceLocator::get::<$dep>(),)*
                        })
                    })
                    .clone()
            }
        }

        #[::async_trait::async_trait]
        impl $crate::core::registry::Repository for $repo {
            fn name(&self) -> &str {
                concat!($name, "_repository")
            }

            fn table_name(&self) -> &str {
                $table
            }

            async fn init(&self) -> Result<(), Box<dyn ::std::error::Error>> {
                Ok(())
            }
        }

        const _: () = {
            fn constructor() -> Box<dyn ::std::any::Any + Send + Sync> {
                Box::new($repo::instance())
            }

            ::inventory::submit! {
                $crate::core::registry::RepositoryRegistration {
                    name: concat!($name, "_repository"),
                    constructor,
                }
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StandaloneClient {
        label: &'static str,
    }

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("profile_repository"), "profile");
        assert_eq!(normalize_registration_name("user_badge_repository"), "userbadge");
        assert_eq!(normalize_registration_name("activity_service"), "activity");
        assert_eq!(normalize_registration_name("badge"), "badge");
    }

    #[test]
    fn test_lookup_key_matches_normalized_registration() {
        let clean = extract_clean_type_name("relief_backend::repositories::UserBadgeRepository");
        assert_eq!(clean, "UserBadgeRepository");
        assert_eq!(
            lookup_key(clean, "Repository"),
            normalize_registration_name("user_badge_repository")
        );
    }

    #[test]
    fn test_set_and_get_infrastructure_component() {
        ServiceLocator::set(Arc::new(StandaloneClient { label: "supabase" }));

        assert!(ServiceLocator::contains::<StandaloneClient>());
        assert_eq!(ServiceLocator::get::<StandaloneClient>().label, "supabase");
    }
}
