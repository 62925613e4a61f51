use kube::CustomResourceExt;

use myapp_operator::myapp::MyApp;

fn main() {
    print!("{}", serde_yaml::to_string(&MyApp::crd()).unwrap());
}
