use crate::context::AppContext;

/// Change the signed-in account's password.
///
/// # Errors
///
/// Returns an error if the password is too short, the session is not
/// authenticated, or the backend rejects the update.
pub(crate) async fn run(ctx: &AppContext, new_password: &str) -> anyhow::Result<()> {
    ctx.session.update_password(new_password).await?;
    println!("password updated");
    Ok(())
}
