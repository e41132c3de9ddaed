use crate::api::models::{NewProperty, NewUser};
use crate::cli::main_types::{AnnouncementCommands, ListArgs, PropertyCommands, UserCommands};
use crate::core::services::{AnnouncementService, PropertyService, UserService};
use crate::display::pagination::{format_page_bar, format_range_line};
use crate::display::{InteractivePager, TableDisplay, export_announcements, export_properties, export_users};
use crate::error::{AppError, CliError};
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_email;
use crate::view::{CollectionView, FilterSpec, Record, SortSpec, ViewState};
use chrono::{NaiveDate, NaiveTime};
use std::io::{self, Write};

const USER_SEARCH_FIELDS: [&str; 4] = ["first_name", "last_name", "email", "type.name"];
const PROPERTY_SEARCH_FIELDS: [&str; 3] = ["owner.title", "type.name", "level.name"];
const ANNOUNCEMENT_SEARCH_FIELDS: [&str; 2] = ["code", "property.type.name"];

/// Query, sort and page position from the shared listing flags.
/// Filters are applied afterwards; the explicit `--page` request is
/// restored last since every state change resets the position.
fn base_state(args: &ListArgs) -> ViewState {
    let mut state = ViewState::new(args.page_size);
    if let Some(query) = &args.search {
        state.set_query(query.clone());
    }
    if let Some(path) = &args.sort {
        let sort = if args.desc {
            SortSpec::descending(path.as_str())
        } else {
            SortSpec::ascending(path.as_str())
        };
        state.set_sort(sort);
    }
    state
}

fn day_start(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64
}

/// Inclusive upper bound covering the whole day.
fn day_end(date: NaiveDate) -> f64 {
    day_start(date) + 86_399.0
}

fn print_listing<R: Record>(
    view: &CollectionView,
    records: &[R],
    state: &ViewState,
    render: impl Fn(&[&R]) -> Result<String, AppError>,
) -> Result<(), AppError> {
    let vm = view.compute(records, state);
    println!("{}", render(&vm.visible)?);
    println!("{}", format_range_line(&vm));
    if vm.total_pages > 1 {
        println!("{}", format_page_bar(&vm));
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    print!("{} (y/N): ", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CliError::InvalidArguments(format!("Failed to flush prompt: {}", e)))?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::InvalidArguments(format!("Failed to read input: {}", e)))?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[derive(Default)]
pub struct UserHandler;

impl UserHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: UserCommands,
        service: &UserService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            UserCommands::List {
                args,
                active,
                user_type,
                role,
                account_approved,
                account_type,
                created_from,
                created_to,
            } => {
                print_verbose(verbose, "Fetching users from the marketplace API");
                let users = service.list_users().await?;

                let view = CollectionView::new(USER_SEARCH_FIELDS);
                let filters = FilterSpec::new()
                    .equals_opt("active", active)
                    .equals_opt("type.id", user_type)
                    .equals_opt("role.id", role)
                    .equals_opt("account.approved", account_approved)
                    .equals_opt("account.type.id", account_type)
                    .between(
                        "created_at",
                        created_from.map(day_start),
                        created_to.map(day_end),
                    );
                let mut state = base_state(&args);
                state.set_filters(filters);
                state.go_to_page(args.page);

                if let Some(path) = &args.export {
                    let vm = view.compute(&users, &state);
                    let count = export_users(path, &vm.filtered)?;
                    println!("✅ Exported {} users to {}", count, path.display());
                    return Ok(());
                }

                let display = TableDisplay::new().with_colors(!args.no_color);
                if args.interactive {
                    InteractivePager::new(&view, &users, state, "Users", move |rows| {
                        display.render_users(rows)
                    })?
                    .run()
                } else {
                    print_listing(&view, &users, &state, |rows| display.render_users(rows))
                }
            }
            UserCommands::Activate { id } => {
                service.set_status(id, true).await?;
                println!("✅ User {} activated", id);
                Ok(())
            }
            UserCommands::Deactivate { id } => {
                service.set_status(id, false).await?;
                println!("✅ User {} deactivated", id);
                Ok(())
            }
            UserCommands::ValidateAccount {
                user_id,
                reject,
                account_type,
                first_wallet,
                comment,
            } => {
                let message = service
                    .validate_account(user_id, !reject, account_type, first_wallet, comment)
                    .await?;
                if reject {
                    println!("✅ Account of user {} rejected. {}", user_id, message);
                } else {
                    println!("✅ Account of user {} approved. {}", user_id, message);
                }
                Ok(())
            }
            UserCommands::Create {
                first_name,
                last_name,
                phone,
                email,
                country,
                role,
                female,
            } => {
                validate_email(&email)?;
                let password = rpassword::prompt_password("Password for the new user: ")
                    .map_err(|e| {
                        CliError::InvalidArguments(format!("Failed to read password: {}", e))
                    })?;

                let message = service
                    .create(NewUser {
                        first_name,
                        last_name,
                        phone,
                        email,
                        country,
                        password,
                        gender: if female { "1" } else { "0" }.to_string(),
                        role_id: role,
                    })
                    .await?;
                println!("✅ User created. {}", message);
                Ok(())
            }
            UserCommands::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete user {}? This cannot be undone", id))? {
                    println!("Cancelled.");
                    return Ok(());
                }
                let message = service.delete(id).await?;
                println!("✅ User {} deleted. {}", id, message);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct PropertyHandler;

impl PropertyHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: PropertyCommands,
        service: &PropertyService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            PropertyCommands::List {
                args,
                property_type,
                approved,
                pool,
                min_price,
                max_price,
            } => {
                print_verbose(verbose, "Fetching properties from the marketplace API");
                let properties = service.list_properties().await?;

                let view = CollectionView::new(PROPERTY_SEARCH_FIELDS);
                let filters = FilterSpec::new()
                    .equals_opt("type.id", property_type)
                    .equals_opt("approved", approved)
                    .equals_opt("pool", pool)
                    .between("price", min_price, max_price);
                let mut state = base_state(&args);
                state.set_filters(filters);
                state.go_to_page(args.page);

                if let Some(path) = &args.export {
                    let vm = view.compute(&properties, &state);
                    let count = export_properties(path, &vm.filtered)?;
                    println!("✅ Exported {} properties to {}", count, path.display());
                    return Ok(());
                }

                let display = TableDisplay::new().with_colors(!args.no_color);
                if args.interactive {
                    InteractivePager::new(&view, &properties, state, "Properties", move |rows| {
                        display.render_properties(rows)
                    })?
                    .run()
                } else {
                    print_listing(&view, &properties, &state, |rows| {
                        display.render_properties(rows)
                    })
                }
            }
            PropertyCommands::Approve { id, comment } => {
                let message = service.approve(id, comment).await?;
                println!("✅ Property {} approved. {}", id, message);
                Ok(())
            }
            PropertyCommands::Reject { id, comment } => {
                let message = service.reject(id, comment).await?;
                println!("✅ Property {} rejected. {}", id, message);
                Ok(())
            }
            PropertyCommands::Create {
                owner,
                property_type,
                city,
                level,
                price,
                area,
                pool,
                bedrooms,
                bathrooms,
                living_rooms,
                garage_places,
            } => {
                let message = service
                    .create(NewProperty {
                        owner_id: owner,
                        type_id: property_type,
                        city_id: city,
                        price,
                        area,
                        pool,
                        living_rooms,
                        bedrooms,
                        garage_places,
                        bathrooms,
                        level_id: level,
                    })
                    .await?;
                println!("✅ Property created. {}", message);
                Ok(())
            }
            PropertyCommands::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete property {}? This cannot be undone", id))? {
                    println!("Cancelled.");
                    return Ok(());
                }
                let message = service.delete(id).await?;
                println!("✅ Property {} deleted. {}", id, message);
                Ok(())
            }
            PropertyCommands::Catalogs => {
                print_verbose(verbose, "Fetching selection catalogs");
                let catalogs = service.catalogs().await?;
                let display = TableDisplay::new();
                println!("{}", display.render_catalogs(&catalogs)?);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct AnnouncementHandler;

impl AnnouncementHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AnnouncementCommands,
        service: &AnnouncementService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AnnouncementCommands::List {
                args,
                announcement_type,
                status,
                min_price,
                max_price,
            } => {
                print_verbose(verbose, "Fetching announcements from the marketplace API");
                let announcements = service.list_announcements().await?;

                let view = CollectionView::new(ANNOUNCEMENT_SEARCH_FIELDS);
                let filters = FilterSpec::new()
                    .equals_opt("type.id", announcement_type)
                    .equals_opt("status", status)
                    .between("price", min_price, max_price);
                let mut state = base_state(&args);
                state.set_filters(filters);
                state.go_to_page(args.page);

                if let Some(path) = &args.export {
                    let vm = view.compute(&announcements, &state);
                    let count = export_announcements(path, &vm.filtered)?;
                    println!("✅ Exported {} announcements to {}", count, path.display());
                    return Ok(());
                }

                let display = TableDisplay::new().with_colors(!args.no_color);
                if args.interactive {
                    InteractivePager::new(&view, &announcements, state, "Announcements", move |rows| {
                        display.render_announcements(rows)
                    })?
                    .run()
                } else {
                    print_listing(&view, &announcements, &state, |rows| {
                        display.render_announcements(rows)
                    })
                }
            }
            AnnouncementCommands::Show { id } => {
                let announcement = service.show(id).await?;
                let display = TableDisplay::new();
                println!("{}", display.render_announcement_detail(&announcement)?);
                Ok(())
            }
        }
    }
}
