use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use pustaka_cli::seeder::{self, SeedConfig};
use pustaka_config::DatabaseConfig;
use pustaka_db::{PgPool, init_db_pool};
use pustaka_models::RoleName;

#[derive(Parser)]
#[command(name = "pustaka-cli")]
#[command(about = "Pustaka CLI - Administrative tools for Pustaka", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert the admin, editor and viewer roles (safe to run repeatedly)
    SeedRoles,
    /// Seed the database with fake buku
    SeedBuku {
        /// Number of buku to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
    /// Seed roles, fake users for every role and fake buku
    Seed {
        /// Number of buku to create
        #[arg(short = 'b', long, default_value = "50")]
        buku: usize,

        /// Number of users to create for each role
        #[arg(short = 'u', long, default_value = "2")]
        users_per_role: usize,
    },
    /// Create a user account with a role
    CreateUser {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Role name: admin, editor or viewer
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Delete every buku
    ClearBuku,
    /// Clear seeded buku and users (keeps roles)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = init_db_pool(&DatabaseConfig::from_env()).await;

    let cli = Cli::parse();

    match cli.command {
        Commands::SeedRoles => handle_seed_roles(&pool).await,
        Commands::SeedBuku { count } => handle_seed_buku(&pool, count).await,
        Commands::Seed {
            buku,
            users_per_role,
        } => handle_seed(&pool, buku, users_per_role).await,
        Commands::CreateUser {
            name,
            email,
            password,
            role,
        } => handle_create_user(&pool, name, email, password, role).await,
        Commands::ClearBuku => handle_clear_buku(&pool).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn handle_seed_roles(pool: &PgPool) {
    if let Err(e) = seeder::seed_roles_only(pool).await {
        eprintln!("\n❌ Error seeding roles: {}", e);
        std::process::exit(1);
    }
}

async fn handle_seed_buku(pool: &PgPool, count: usize) {
    if let Err(e) = seeder::seed_buku_only(pool, count).await {
        eprintln!("\n❌ Error seeding buku: {}", e);
        std::process::exit(1);
    }
}

async fn handle_seed(pool: &PgPool, buku: usize, users_per_role: usize) {
    let config = SeedConfig::new(buku).with_users_per_role(users_per_role);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_create_user(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
) {
    let name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Name")
            .interact_text()
            .expect("Failed to read name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    let role = match role {
        Some(role) => match role.parse::<RoleName>() {
            Ok(role) => role,
            Err(e) => {
                eprintln!("\n❌ {} (expected admin, editor or viewer)", e);
                std::process::exit(1);
            }
        },
        None => {
            let choices: Vec<&str> = RoleName::ALL.iter().map(|r| r.as_str()).collect();
            let selected = Select::new()
                .with_prompt("Role")
                .items(&choices)
                .default(RoleName::ALL.len() - 1)
                .interact()
                .expect("Failed to read role");
            RoleName::ALL[selected]
        }
    };

    match seeder::users::create_user(pool, &name, &email, &password, role).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   ID: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
            println!("   Role: {}", role);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_buku(pool: &PgPool) {
    if let Err(e) = seeder::clear_buku_only(pool).await {
        eprintln!("\n❌ Error clearing buku: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
