use chrono::DateTime;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use pustaka_auth::{Claims, create_access_token};
use pustaka_config::JwtConfig;
use pustaka_core::validation::field_error;
use pustaka_core::{AppError, hash_password, verify_password};
use pustaka_models::{
    AuthResponse, LoginRequest, RegisterRequest, RoleId, User, UserCredentials, UserId,
    UserWithRole,
};

const USER_COLUMNS: &str = "id, name, email, role_id, created_at, updated_at";

fn email_taken() -> validator::ValidationError {
    field_error("unique", "The email has already been taken.".to_string())
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let mut draft = dto.check();

        if let Some(email) = &draft.email
            && Self::email_exists(db, email).await?
        {
            draft.errors.add("email", email_taken());
        }

        if let Some(role_id) = draft.role_id
            && !Self::role_exists(db, role_id).await?
        {
            draft.errors.add(
                "role_id",
                field_error("exists", "The selected role_id is invalid.".to_string()),
            );
        }

        let fields = draft.finish().map_err(|errors| AppError::validation(&errors))?;
        let hashed_password = hash_password(&fields.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&hashed_password)
        .bind(fields.role_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration of the same email
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                let mut errors = validator::ValidationErrors::new();
                errors.add("email", email_taken());
                return AppError::validation(&errors);
            }
            AppError::from(e)
        })?;

        let token = Self::issue_token(&user, jwt_config)?;
        tracing::info!(user_id = %user.id, role_id = %user.role_id, "User registered");

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let invalid_credentials = || AppError::unauthorized("Invalid credentials".to_string());

        let fields = dto
            .into_fields()
            .map_err(|errors| AppError::validation(&errors))?;

        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password, role_id, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&fields.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(invalid_credentials)?;

        if !verify_password(&fields.password, &credentials.password)? {
            return Err(invalid_credentials());
        }

        let user = User::from(credentials);
        let token = Self::issue_token(&user, jwt_config)?;

        Ok(AuthResponse { user, token })
    }

    /// Revokes the token described by `claims`. Other tokens of the same user
    /// stay valid.
    #[instrument(skip(db, claims), fields(user_id = %claims.sub))]
    pub async fn logout(db: &PgPool, claims: &Claims) -> Result<(), AppError> {
        let expires_at = DateTime::from_timestamp(claims.exp as i64, 0)
            .ok_or_else(|| AppError::unauthorized("Invalid token expiry".to_string()))?;

        sqlx::query(
            "INSERT INTO revoked_tokens (jti, expires_at)
             VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(claims.token_id()?)
        .bind(expires_at)
        .execute(db)
        .await?;

        // Expired tokens fail verification anyway
        sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(db)
            .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn is_token_revoked(db: &PgPool, jti: Uuid) -> Result<bool, AppError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(db)
        .await?;

        Ok(revoked)
    }

    #[instrument(skip(db))]
    pub async fn find_user_with_role(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserWithRole>, AppError> {
        let user = sqlx::query_as::<_, UserWithRole>(
            "SELECT u.id, u.name, u.email, u.role_id, u.created_at, u.updated_at, r.name AS role
             FROM users u
             JOIN roles r ON r.id = u.role_id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    async fn email_exists(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    async fn role_exists(db: &PgPool, role_id: RoleId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE id = $1)")
                .bind(role_id)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
        create_access_token(
            user.id.into_inner(),
            &user.email,
            user.role_id.into_inner(),
            jwt_config,
        )
    }
}
