//! Clap derive structures for the `webdash` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// webdash -- admin dashboard for the WebDynamo backend
#[derive(Debug, Parser)]
#[command(
    name = "webdash",
    version,
    about = "Administer the WebDynamo dashboard from the command line",
    long_about = "Sign in to a WebDynamo backend and manage its users, roles, permissions,\n\
        portfolio projects, SEO metadata and contact inbox.\n\n\
        The session is persisted per profile; dashboard commands require a\n\
        stored, unexpired token.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "WEBDASH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "WEBDASH_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WEBDASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "WEBDASH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "WEBDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginArgs),

    /// End the session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Re-fetch the profile so role and permission changes take effect
        #[arg(long)]
        refresh: bool,
    },

    /// Check a role or permission against the session
    Can(CanArgs),

    /// Show where the route guard sends a dashboard path
    Navigate {
        /// Path such as /dashboard/users/role
        path: String,
    },

    /// Manage dashboard users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage roles
    #[command(alias = "r")]
    Roles(RolesArgs),

    /// Manage permissions
    #[command(alias = "perm")]
    Permissions(PermissionsArgs),

    /// Manage portfolio projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Manage per-page SEO metadata
    Seo(SeoArgs),

    /// Read contact form submissions
    Contacts(ContactsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Client-side filtering for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring filter over the listed records
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Mutually exclusive active/inactive switch.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Mark as active
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Mark as inactive
    #[arg(long)]
    pub inactive: bool,
}

impl StatusArgs {
    /// `Some(true)` for `--active`, `Some(false)` for `--inactive`.
    pub fn value(&self) -> Option<bool> {
        match (self.active, self.inactive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email (defaults to the profile's email, then a prompt)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prefer the keyring, WEBDASH_PASSWORD or the prompt)
    #[arg(long, hide = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CanArgs {
    /// Role name, case-insensitive
    #[arg(long)]
    pub role: Option<String>,

    /// Permission name, case-insensitive
    #[arg(long)]
    pub permission: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List one page of users
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show a user from the given page
    Get {
        id: u64,

        /// Page the user is on
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Register a new user
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long, hide = true)]
        password: Option<String>,

        /// Role to assign (repeatable)
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
    },

    /// Update a user's profile
    Update {
        id: u64,

        /// Page the user is on
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        branch_id: Option<u64>,

        /// Replace roles (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        id: u64,

        /// Page the user is on
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RolesArgs {
    #[command(subcommand)]
    pub command: RolesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    /// List roles with their permissions
    #[command(alias = "ls")]
    List(ListArgs),

    /// List role ids and names only
    Names,

    /// List users grouped by role
    Members,

    /// Show a role
    Get { id: u64 },

    /// Create a role
    Create {
        #[arg(long)]
        name: String,

        /// Permission to grant (repeatable)
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },

    /// Rename a role or replace its permissions
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        /// Replace permissions (repeatable)
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },

    /// Delete a role
    #[command(alias = "rm")]
    Delete { id: u64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PERMISSIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PermissionsArgs {
    #[command(subcommand)]
    pub command: PermissionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PermissionsCommand {
    /// List permissions
    #[command(alias = "ls")]
    List(ListArgs),

    /// List permission ids and names for role forms
    Names,

    /// Show a permission
    Get { id: u64 },

    /// Create a permission
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        guard_name: Option<String>,
    },

    /// Rename a permission
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        guard_name: Option<String>,
    },

    /// Delete a permission
    #[command(alias = "rm")]
    Delete { id: u64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROJECTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a project
    Get { id: u64 },

    /// Create a project
    Create(ProjectFields),

    /// Update a project; omitted fields keep their current value
    Update {
        id: u64,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Delete a project
    #[command(alias = "rm")]
    Delete { id: u64 },
}

#[derive(Debug, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub short_description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub team_size: Option<String>,

    /// Rating between 0 and 5
    #[arg(long)]
    pub rating: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    /// Four-digit year
    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub live_url: Option<String>,

    #[arg(long)]
    pub github_url: Option<String>,

    /// Technology as NAME=ICON (repeatable; replaces the list)
    #[arg(long = "tech", value_name = "NAME=ICON")]
    pub technologies: Vec<String>,

    /// Cover image uploaded as multipart form data
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub status: StatusArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SeoArgs {
    #[command(subcommand)]
    pub command: SeoCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeoCommand {
    /// List SEO pages
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the metadata for a page slug
    Get { slug: String },

    /// Create SEO metadata for a page
    Create(SeoFields),

    /// Update SEO metadata; omitted fields keep their current value
    Update {
        id: u64,

        #[command(flatten)]
        fields: SeoFields,
    },

    /// Delete SEO metadata
    #[command(alias = "rm")]
    Delete { id: u64 },
}

#[derive(Debug, Args)]
pub struct SeoFields {
    #[arg(long)]
    pub page_name: Option<String>,

    /// Lowercase slug, e.g. about-us
    #[arg(long)]
    pub page_slug: Option<String>,

    #[arg(long)]
    pub meta_title: Option<String>,

    #[arg(long)]
    pub meta_description: Option<String>,

    #[arg(long)]
    pub meta_keywords: Option<String>,

    #[command(flatten)]
    pub status: StatusArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTACTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContactsArgs {
    #[command(subcommand)]
    pub command: ContactsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List contact messages
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one message in full
    Get { id: u64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_url, environment, email, password_env, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's login password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
