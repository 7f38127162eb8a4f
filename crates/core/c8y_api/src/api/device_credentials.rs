use crate::json_c8y::DeviceCredentials;
use crate::json_c8y::DeviceCredentialsRequest;
use crate::media_types;
use c8y_http::RestError;

const DEVICE_CREDENTIALS: &str = "/devicecontrol/deviceCredentials";

api_handle!(
    /// `/devicecontrol/deviceCredentials`
    DeviceCredentialsApi
);

impl DeviceCredentialsApi<'_> {
    /// Poll the credentials of a device being registered
    ///
    /// The request is sent with the bootstrap credentials and fails with a 404
    /// until the registration of the device is accepted.
    pub async fn request(&self, device_id: &str) -> Result<DeviceCredentials, RestError> {
        let request = self
            .ctx
            .post(DEVICE_CREDENTIALS, &[])
            .content_type(media_types::DEVICE_CREDENTIALS)
            .accept(media_types::DEVICE_CREDENTIALS)
            .json(&DeviceCredentialsRequest {
                id: device_id.to_string(),
            });
        self.ctx.as_bootstrap_user(request).send_json().await
    }
}
