//! Mock account commands.

use anyhow::Result;
use urbno_commerce::account::{Accounts, User};

use super::{AccountArgs, AccountCommand};
use crate::context::Context;

/// Run the account command.
pub fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let mut accounts = Accounts::load(&store)?;

    match args.command {
        AccountCommand::Signup { email } => {
            let outcome = accounts.sign_up(&email)?;
            accounts.save(&store)?;
            ctx.output.success(outcome.message());
            print_user(outcome.user(), ctx);
        }
        AccountCommand::Login { email } => {
            let user = accounts.sign_in(&email)?.clone();
            accounts.save(&store)?;
            ctx.output.success("Welcome back!");
            print_user(&user, ctx);
        }
        AccountCommand::Logout => match accounts.sign_out() {
            Some(email) => {
                accounts.save(&store)?;
                ctx.output.success(&format!("Signed out {}", email));
            }
            None => ctx.output.info("Nobody is signed in"),
        },
        AccountCommand::Whoami => {
            let user = accounts.require_user()?;
            print_user(user, ctx);
        }
    }

    Ok(())
}

fn print_user(user: &User, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }
    ctx.output.kv("Email", &user.email);
    ctx.output.kv("Referral code", &user.referral_code);
    ctx.output.kv("Balance", &user.balance.display_compact());
}
