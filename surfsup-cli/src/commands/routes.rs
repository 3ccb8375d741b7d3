//! Print the route listing served at `/`

use surfsup_server::routes::home::ROUTE_LISTING;

pub fn run_routes() {
    print!("{}", ROUTE_LISTING);
}
