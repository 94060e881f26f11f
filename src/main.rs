use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use bycatch_viewer::db::establish_connection_pool;
use bycatch_viewer::models::config::ServerConfig;
use bycatch_viewer::repository::DieselRepository;
use bycatch_viewer::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load server configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url, server_config.pool_size)
    {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving bycatch viewer on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(routes::configure);

        match &server_config.static_dir {
            Some(dir) => {
                let index = format!("{dir}/index.html");
                app.service(Files::new("/", dir).index_file("index.html").default_handler(
                    fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(&index).await?;
                            let res = file.into_response(&req);
                            Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                        }
                    }),
                ))
            }
            None => app,
        }
    })
    .bind(bind_address)?
    .run()
    .await
}
