use bacheca_client_web::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
