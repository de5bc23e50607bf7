use crate::args::{LoginArgs, PasswordArgs, SignupArgs};
use crate::commands::{Context, Out};
use crate::model::{Credentials, PasswordChange, SignUp, User};
use crate::Result;
use anyhow::bail;

pub async fn login(ctx: &Context, args: &LoginArgs) -> Result<Out<User>> {
    let credentials = Credentials {
        email: args.email.clone(),
        password: args.password.clone(),
    };
    let user = ctx.store().login(ctx.api(), &credentials).await?;
    ctx.finish(Out::new(format!("Signed in as {}", user.username), user))
        .await
}

pub async fn signup(ctx: &Context, args: &SignupArgs) -> Result<Out<User>> {
    let sign_up = SignUp {
        email: args.email.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
    };
    let user = ctx.store().sign_up(ctx.api(), &sign_up).await?;
    ctx.finish(Out::new(
        format!("Created user {} and signed in", user.username),
        user,
    ))
    .await
}

/// Signs out: resets the store, deletes the session token and the saved snapshot.
pub async fn logout(ctx: &Context) -> Result<Out<()>> {
    ctx.store().logout(ctx.api()).await?;
    ctx.config().db().clear_snapshots().await?;
    Ok("Signed out".into())
}

pub async fn whoami(ctx: &Context) -> Result<Out<User>> {
    if ctx.api().tokens().token().is_none() {
        bail!("Not signed in, run `pocketbook login` first");
    }
    let user = ctx.store().fetch_user(ctx.api()).await?;
    ctx.finish(Out::new(
        format!("{} <{}> ({})", user.username, user.email, user.role),
        user,
    ))
    .await
}

pub async fn password(ctx: &Context, args: &PasswordArgs) -> Result<Out<()>> {
    let change = PasswordChange {
        old_password: args.old.clone(),
        new_password: args.new.clone(),
    };
    ctx.store().change_password(ctx.api(), &change).await?;
    ctx.finish("Password changed".into()).await
}
